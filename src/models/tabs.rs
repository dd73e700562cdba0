/// Panels reachable from the tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Logs,
    Complaints,
    Overrides,
    Synonyms,
    Priorities,
    Training,
    Users,
    Stats,
}

impl Tab {
    pub const ALL: [Tab; 8] = [
        Tab::Logs,
        Tab::Complaints,
        Tab::Overrides,
        Tab::Synonyms,
        Tab::Priorities,
        Tab::Training,
        Tab::Users,
        Tab::Stats,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Logs => "Logs",
            Tab::Complaints => "Complaints",
            Tab::Overrides => "Manual answers",
            Tab::Synonyms => "Synonyms",
            Tab::Priorities => "Priorities",
            Tab::Training => "Training",
            Tab::Users => "Users",
            Tab::Stats => "Statistics",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Tab::Logs => "/logs",
            Tab::Complaints => "/complaints",
            Tab::Overrides => "/overrides",
            Tab::Synonyms => "/synonyms",
            Tab::Priorities => "/priorities",
            Tab::Training => "/training",
            Tab::Users => "/users",
            Tab::Stats => "/stats",
        }
    }
}

/// One entry of the rendered tab bar.
#[derive(Debug, Clone)]
pub struct TabLink {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

pub fn tab_bar(active: Tab) -> Vec<TabLink> {
    Tab::ALL
        .iter()
        .map(|&tab| TabLink { label: tab.label(), href: tab.path(), active: tab == active })
        .collect()
}
