#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Translate,
    LookUp,
    Search,
    ListAll,
    Edit,
    Remove,
    History,
    Quit,
    Unknown,
}

impl MenuOption {
    pub const MENU: [(&'static str, &'static str); 8] = [
        ("1", "Translate word/expression"),
        ("2", "Look up entry"),
        ("3", "Search content"),
        ("4", "List all entries"),
        ("5", "Edit entry"),
        ("6", "Remove entry"),
        ("7", "Change history"),
        ("0", "Quit"),
    ];
}

impl From<&str> for MenuOption {
    fn from(s: &str) -> Self {
        match s.trim() {
            "1" => MenuOption::Translate,
            "2" => MenuOption::LookUp,
            "3" => MenuOption::Search,
            "4" => MenuOption::ListAll,
            "5" => MenuOption::Edit,
            "6" => MenuOption::Remove,
            "7" => MenuOption::History,
            "0" => MenuOption::Quit,
            _ => MenuOption::Unknown,
        }
    }
}
