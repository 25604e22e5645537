/// Explicit configuration for both dashboard endpoints, assembled once at
/// startup and shared through the router state.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub contributions: contrib::Config,
    pub status: hoststat::StatusConfig,
}
