use crate::store::KeyValueStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Bump to show the announcement again after a release.
pub const BANNER_VERSION: &str = "2025.06-location-search";
pub const BANNER_MESSAGE: &str =
    "Update: you can now search by place name or street as well as by postcode.";

const DISMISSED_KEY: &str = "carpark_finder_update_banner_dismissed";
const LAST_SHOWN_VERSION_KEY: &str = "carpark_finder_last_shown_version";
const DISMISSED: &str = "true";

pub struct UpdateBanner {
    store: Arc<dyn KeyValueStore>,
    version: String,
    visible: AtomicBool,
}

impl UpdateBanner {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_version(store, BANNER_VERSION)
    }

    pub fn with_version(store: Arc<dyn KeyValueStore>, version: impl Into<String>) -> Self {
        Self {
            store,
            version: version.into(),
            visible: AtomicBool::new(false),
        }
    }

    pub fn message(&self) -> &'static str {
        BANNER_MESSAGE
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// Decides visibility once per start. Showing records the current version
    /// straight away, whether or not the banner is dismissed afterwards.
    #[tracing::instrument(skip(self), fields(version = %self.version), level = "info")]
    pub fn should_show(&self) -> bool {
        let dismissed = self.read(DISMISSED_KEY).as_deref() == Some(DISMISSED);
        let last_shown_version = self.read(LAST_SHOWN_VERSION_KEY);
        let show = !dismissed || last_shown_version.as_deref() != Some(self.version.as_str());

        if show {
            if let Err(err) = self.store.set(LAST_SHOWN_VERSION_KEY, &self.version) {
                tracing::warn!("Failed to record shown banner version: {err:?}");
            }
        }

        self.visible.store(show, Ordering::SeqCst);
        show
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    pub fn dismiss(&self) -> anyhow::Result<()> {
        self.visible.store(false, Ordering::SeqCst);
        self.store.set(DISMISSED_KEY, DISMISSED)
    }

    fn read(&self, key: &str) -> Option<String> {
        self.store
            .get(key)
            .map_err(|err| tracing::warn!("Failed to read {key} from store: {err:?}"))
            .ok()
            .flatten()
    }
}
