//! Client-side filtering and sorting of an already fetched collection.
//!
//! Only used for the unpaged listing; in paged mode the server filters,
//! sorts and slices.

use std::cmp::Ordering;

use crate::model::{
    Book, BookFilter, GenreDto, LookupTable, SortColumn, SortDirection, StatusDto,
};

pub fn filter_and_sort(
    books: &[Book],
    filter: &BookFilter,
    statuses: &LookupTable<StatusDto>,
    genres: &LookupTable<GenreDto>,
) -> Vec<Book> {
    let search = filter.search.trim().to_lowercase();
    let status = filter.status_id.map(|id| statuses.name_for(id));
    let genre = filter.genre_id.map(|id| genres.name_for(id));

    let mut visible: Vec<Book> = books
        .iter()
        .filter(|book| search.is_empty() || matches_search(book, &search))
        .filter(|book| status.is_none_or(|name| same_name(book.status.as_deref(), name)))
        .filter(|book| genre.is_none_or(|name| same_name(book.genre.as_deref(), name)))
        .cloned()
        .collect();

    sort_books(&mut visible, filter.sort_by, filter.sort_dir);
    visible
}

/// Stable sort; equal keys keep their incoming order in both directions.
pub fn sort_books(books: &mut [Book], column: SortColumn, direction: SortDirection) {
    books.sort_by(|a, b| {
        let ordering = compare(a, b, column);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

pub fn compare(a: &Book, b: &Book, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Title => compare_text(a.title.as_deref(), b.title.as_deref()),
        SortColumn::Author => compare_text(a.author.as_deref(), b.author.as_deref()),
        SortColumn::Genre => compare_text(a.genre.as_deref(), b.genre.as_deref()),
        SortColumn::Status => compare_text(a.status.as_deref(), b.status.as_deref()),
        SortColumn::PublishedYear => a.published_year.cmp(&b.published_year),
        SortColumn::Rating => compare_rating(a.rating, b.rating),
    }
}

// Missing values order before present ones.
fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

fn compare_rating(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

fn matches_search(book: &Book, needle: &str) -> bool {
    [&book.title, &book.author, &book.isbn]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

/// A filter id that no longer resolves to a name matches nothing.
fn same_name(field: Option<&str>, wanted: Option<&str>) -> bool {
    match (field, wanted) {
        (Some(field), Some(wanted)) => field.eq_ignore_ascii_case(wanted),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i64, title: &str, author: &str, year: Option<i32>, rating: Option<f64>) -> Book {
        Book {
            id,
            title: Some(title.into()),
            author: Some(author.into()),
            isbn: None,
            published_year: year,
            genre: None,
            status: None,
            rating,
            created_at: None,
            updated_at: None,
        }
    }

    fn ids(books: &[Book]) -> Vec<i64> {
        books.iter().map(|b| b.id).collect()
    }

    fn catalog() -> Vec<Book> {
        let mut books = vec![
            book(1, "The Hobbit", "Tolkien", Some(1937), Some(4.5)),
            book(2, "Dune", "Herbert", Some(1965), Some(4.5)),
            book(3, "emma", "Austen", None, None),
            book(4, "Anathem", "Stephenson", Some(2008), Some(4.0)),
        ];
        books[0].genre = Some("Fantasy".into());
        books[0].status = Some("Read".into());
        books[1].genre = Some("Science Fiction".into());
        books[1].status = Some("Reading".into());
        books[3].genre = Some("Science Fiction".into());
        books[3].status = Some("Read".into());
        books
    }

    fn lookups() -> (LookupTable<StatusDto>, LookupTable<GenreDto>) {
        (
            LookupTable::new(vec![
                StatusDto {
                    id: 1,
                    name: Some("Read".into()),
                },
                StatusDto {
                    id: 2,
                    name: Some("Reading".into()),
                },
            ]),
            LookupTable::new(vec![
                GenreDto {
                    id: 10,
                    name: Some("Fantasy".into()),
                },
                GenreDto {
                    id: 11,
                    name: Some("Science Fiction".into()),
                },
            ]),
        )
    }

    #[test]
    fn title_sort_is_case_insensitive() {
        let mut books = catalog();
        sort_books(&mut books, SortColumn::Title, SortDirection::Asc);
        assert_eq!(ids(&books), vec![4, 2, 3, 1]);
    }

    #[test]
    fn ties_keep_original_order_in_both_directions() {
        let mut asc = catalog();
        sort_books(&mut asc, SortColumn::Rating, SortDirection::Asc);
        assert_eq!(ids(&asc), vec![3, 4, 1, 2]);

        let mut desc = catalog();
        sort_books(&mut desc, SortColumn::Rating, SortDirection::Desc);
        assert_eq!(ids(&desc), vec![1, 2, 4, 3]);
    }

    #[test]
    fn missing_years_sort_first_ascending() {
        let mut books = catalog();
        sort_books(&mut books, SortColumn::PublishedYear, SortDirection::Asc);
        assert_eq!(ids(&books), vec![3, 1, 2, 4]);
    }

    #[test]
    fn search_matches_title_author_or_isbn() {
        let (statuses, genres) = lookups();
        let mut books = catalog();
        books[2].isbn = Some("978-0141439587".into());

        let by_author = BookFilter {
            search: "TOLK".into(),
            ..BookFilter::default()
        };
        assert_eq!(ids(&filter_and_sort(&books, &by_author, &statuses, &genres)), vec![1]);

        let by_isbn = BookFilter {
            search: "0141439587".into(),
            ..BookFilter::default()
        };
        assert_eq!(ids(&filter_and_sort(&books, &by_isbn, &statuses, &genres)), vec![3]);
    }

    #[test]
    fn ids_resolve_through_lookup_tables() {
        let (statuses, genres) = lookups();
        let filter = BookFilter {
            status_id: Some(1),
            genre_id: Some(11),
            ..BookFilter::default()
        };
        assert_eq!(
            ids(&filter_and_sort(&catalog(), &filter, &statuses, &genres)),
            vec![4]
        );
    }

    #[test]
    fn unknown_lookup_id_matches_nothing() {
        let (statuses, genres) = lookups();
        let filter = BookFilter {
            genre_id: Some(99),
            ..BookFilter::default()
        };
        assert!(filter_and_sort(&catalog(), &filter, &statuses, &genres).is_empty());
    }
}
