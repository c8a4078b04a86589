#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    Navigate(Direction),
    EndSelected,
    Optimize,
    Refresh,
    ToggleHelp,
    DismissDialog,
    None,
}
