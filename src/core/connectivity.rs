use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    #[default]
    Online,
    Offline,
}

impl Connectivity {
    pub fn is_online(&self) -> bool {
        matches!(self, Connectivity::Online)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Connectivity::Online => "online",
            Connectivity::Offline => "offline",
        }
    }
}

/// Edge produced by a connectivity observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    WentOnline,
    WentOffline,
    Unchanged,
}

/// Turns successive connectivity observations into edges, so a sync is
/// triggered once per offline → online change and never by staying online.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectivityMonitor {
    state: Connectivity,
}

impl ConnectivityMonitor {
    pub fn new(state: Connectivity) -> Self {
        Self { state }
    }

    pub fn state(&self) -> Connectivity {
        self.state
    }

    pub fn observe(&mut self, next: Connectivity) -> Transition {
        let transition = match (self.state, next) {
            (Connectivity::Offline, Connectivity::Online) => Transition::WentOnline,
            (Connectivity::Online, Connectivity::Offline) => Transition::WentOffline,
            _ => Transition::Unchanged,
        };
        self.state = next;
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_edges_are_reported() {
        let mut m = ConnectivityMonitor::default();
        assert_eq!(m.observe(Connectivity::Online), Transition::Unchanged);
        assert_eq!(m.observe(Connectivity::Offline), Transition::WentOffline);
        assert_eq!(m.observe(Connectivity::Offline), Transition::Unchanged);
        assert_eq!(m.observe(Connectivity::Online), Transition::WentOnline);
        assert_eq!(m.observe(Connectivity::Online), Transition::Unchanged);
        assert!(m.state().is_online());
    }
}
