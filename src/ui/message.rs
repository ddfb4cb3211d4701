#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    Quit,
    GoBack,
    DismissError,
}
