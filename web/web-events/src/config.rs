/// Id of the page element the event rows are rendered into.
pub const CONTAINER_ID: &str = "rievents";

const PRODUCTION_ORIGIN: &str = "https://serverless-events-api.fermyon.app";
const LOCAL_DEVELOPMENT_ORIGIN: &str = "http://127.0.0.1:3000";

/// Where the events API lives. Picked at build time with the `local-api` feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOrigin {
    Production,
    LocalDevelopment,
}

impl ApiOrigin {
    pub const fn current() -> Self {
        if cfg!(feature = "local-api") {
            ApiOrigin::LocalDevelopment
        } else {
            ApiOrigin::Production
        }
    }

    pub const fn base_url(self) -> &'static str {
        match self {
            ApiOrigin::Production => PRODUCTION_ORIGIN,
            ApiOrigin::LocalDevelopment => LOCAL_DEVELOPMENT_ORIGIN,
        }
    }

    pub fn events_url(self) -> String {
        format!("{}/api/", self.base_url())
    }
}
