//! Loading-state adapters over a [`ContentSource`].
//!
//! A hook starts a fetch as soon as it is created and exposes the result as a
//! [`LoadState`] that view code can poll (`is_loading` / `data`) or await.

use crate::domain::model::{AcademyProduct, ServiceItem, Testimonial, UnitConfig};
use crate::domain::ports::ContentSource;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

pub type SharedSource = Arc<dyn ContentSource>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Pending,
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            LoadState::Pending => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            LoadState::Ready(data) => Some(data),
            LoadState::Pending => None,
        }
    }
}

/// One fetch, one transition: `Pending` then `Ready`.
#[derive(Debug, Clone)]
pub struct ContentHook<T> {
    rx: watch::Receiver<LoadState<T>>,
}

impl<T> ContentHook<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawns `fetch` on the current tokio runtime.
    pub fn spawn<Fut>(fetch: Fut) -> Self
    where
        Fut: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = watch::channel(LoadState::Pending);
        tokio::spawn(async move {
            let data = fetch.await;
            // Nobody listening any more is fine.
            let _ = tx.send(LoadState::Ready(data));
        });
        Self { rx }
    }

    pub fn state(&self) -> LoadState<T> {
        self.rx.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.rx.borrow().is_loading()
    }

    /// The resolved data, or `T::default()` while still loading.
    pub fn data(&self) -> T
    where
        T: Default,
    {
        self.rx.borrow().ready().cloned().unwrap_or_default()
    }

    /// Waits for the fetch to resolve. `None` only if the runtime dropped the
    /// fetch task before it finished.
    pub async fn wait_ready(&self) -> Option<T> {
        let mut rx = self.rx.clone();
        let state = rx.wait_for(|state| !state.is_loading()).await.ok()?;
        state.ready().cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState<T>> {
        self.rx.clone()
    }
}

pub fn use_services(source: &SharedSource) -> ContentHook<Vec<ServiceItem>> {
    let source = Arc::clone(source);
    ContentHook::spawn(async move { source.fetch_all_services().await })
}

pub fn use_units(source: &SharedSource) -> ContentHook<Vec<UnitConfig>> {
    let source = Arc::clone(source);
    ContentHook::spawn(async move { source.fetch_all_units().await })
}

pub fn use_academy(source: &SharedSource) -> ContentHook<Vec<AcademyProduct>> {
    let source = Arc::clone(source);
    ContentHook::spawn(async move { source.fetch_all_academy_products().await })
}

pub fn use_testimonials(source: &SharedSource) -> ContentHook<Vec<Testimonial>> {
    let source = Arc::clone(source);
    ContentHook::spawn(async move { source.fetch_all_testimonials().await })
}

#[derive(Debug, Clone)]
struct UnitSlot {
    generation: u64,
    slug: Option<String>,
    state: LoadState<Option<UnitConfig>>,
}

/// Slug-keyed unit lookup.
///
/// Changing the slug resets the hook to `Pending` and issues a new lookup.
/// Every lookup is tagged with the generation it was issued under; a result
/// whose generation is no longer current is dropped, so a slow lookup for an
/// old slug can never overwrite the state of a newer one.
pub struct UnitHook {
    source: SharedSource,
    tx: Arc<watch::Sender<UnitSlot>>,
    rx: watch::Receiver<UnitSlot>,
}

impl UnitHook {
    /// With no slug the hook stays `Pending` and nothing is fetched.
    pub fn new(source: &SharedSource, slug: Option<&str>) -> Self {
        let (tx, rx) = watch::channel(UnitSlot {
            generation: 0,
            slug: None,
            state: LoadState::Pending,
        });
        let hook = Self {
            source: Arc::clone(source),
            tx: Arc::new(tx),
            rx,
        };
        hook.set_slug(slug);
        hook
    }

    /// Setting the slug it already has is a no-op.
    pub fn set_slug(&self, slug: Option<&str>) {
        let mut issued = None;
        self.tx.send_if_modified(|slot| {
            if slot.slug.as_deref() == slug {
                return false;
            }
            slot.generation += 1;
            slot.slug = slug.map(str::to_string);
            slot.state = LoadState::Pending;
            issued = slug.map(|s| (slot.generation, s.to_string()));
            true
        });

        if let Some((generation, slug)) = issued {
            self.spawn_lookup(generation, slug);
        }
    }

    fn spawn_lookup(&self, generation: u64, slug: String) {
        let source = Arc::clone(&self.source);
        let tx = Arc::clone(&self.tx);
        tokio::spawn(async move {
            let unit = source.fetch_unit_by_slug(&slug).await;
            let applied = tx.send_if_modified(move |slot| {
                if slot.generation != generation {
                    return false;
                }
                slot.state = LoadState::Ready(unit);
                true
            });
            if !applied {
                tracing::debug!(
                    "Discarded stale unit lookup for '{}' (generation {})",
                    slug,
                    generation
                );
            }
        });
    }

    pub fn slug(&self) -> Option<String> {
        self.rx.borrow().slug.clone()
    }

    pub fn state(&self) -> LoadState<Option<UnitConfig>> {
        self.rx.borrow().state.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.rx.borrow().state.is_loading()
    }

    /// The unit, or `None` while loading or when the slug matched nothing.
    pub fn unit(&self) -> Option<UnitConfig> {
        self.rx.borrow().state.ready().cloned().flatten()
    }

    /// Waits until the current slug's lookup resolves. Never returns while
    /// no slug is set.
    pub async fn wait_ready(&self) -> Option<UnitConfig> {
        let mut rx = self.rx.clone();
        let slot = rx.wait_for(|slot| !slot.state.is_loading()).await.ok()?;
        slot.state.ready().cloned().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeContent {
    pub services: Vec<ServiceItem>,
    pub units: Vec<UnitConfig>,
    pub academy_products: Vec<AcademyProduct>,
    pub testimonials: Vec<Testimonial>,
}

/// The four collection hooks the home page starts together. They resolve
/// independently; the page is ready only once every one of them is.
pub struct HomeHooks {
    pub services: ContentHook<Vec<ServiceItem>>,
    pub units: ContentHook<Vec<UnitConfig>>,
    pub academy: ContentHook<Vec<AcademyProduct>>,
    pub testimonials: ContentHook<Vec<Testimonial>>,
}

impl HomeHooks {
    pub fn start(source: &SharedSource) -> Self {
        Self {
            services: use_services(source),
            units: use_units(source),
            academy: use_academy(source),
            testimonials: use_testimonials(source),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.services.is_loading()
            || self.units.is_loading()
            || self.academy.is_loading()
            || self.testimonials.is_loading()
    }

    pub async fn wait_ready(&self) -> Option<HomeContent> {
        let (services, units, academy_products, testimonials) = tokio::join!(
            self.services.wait_ready(),
            self.units.wait_ready(),
            self.academy.wait_ready(),
            self.testimonials.wait_ready(),
        );
        Some(HomeContent {
            services: services?,
            units: units?,
            academy_products: academy_products?,
            testimonials: testimonials?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::content_tables::ContentTables;
    use crate::config::FacadeSettings;
    use crate::core::facade::StaticContentSource;
    use std::time::Duration;

    fn shared_source() -> SharedSource {
        let tables = ContentTables::builtin().unwrap().into_shared();
        Arc::new(StaticContentSource::new(tables, &FacadeSettings::default()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_collection_hook_starts_pending() {
        let hook = use_services(&shared_source());

        assert!(hook.is_loading());
        assert!(hook.data().is_empty());
        assert_eq!(hook.state(), LoadState::Pending);

        let services = hook.wait_ready().await.unwrap();
        assert_eq!(services.len(), 13);
        assert!(!hook.is_loading());
        assert_eq!(hook.data(), services);
    }

    #[tokio::test(start_paused = true)]
    async fn test_collection_hook_is_still_pending_before_delay() {
        let hook = use_testimonials(&shared_source());

        tokio::time::sleep(Duration::from_millis(599)).await;
        assert!(hook.is_loading());

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(hook.state().into_ready().map(|t| t.len()), Some(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unit_hook_without_slug_never_fetches() {
        let hook = UnitHook::new(&shared_source(), None);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(hook.is_loading());
        assert_eq!(hook.slug(), None);
        assert_eq!(hook.unit(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unit_hook_miss_resolves_to_none() {
        let hook = UnitHook::new(&shared_source(), Some("recife"));

        assert_eq!(hook.wait_ready().await, None);
        assert_eq!(hook.state(), LoadState::Ready(None));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unit_hook_same_slug_is_noop() {
        let hook = UnitHook::new(&shared_source(), Some("sorriso"));
        hook.wait_ready().await.unwrap();

        hook.set_slug(Some("sorriso"));
        assert!(!hook.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_home_hooks_join() {
        let home = HomeHooks::start(&shared_source());
        assert!(home.is_loading());

        let content = home.wait_ready().await.unwrap();
        assert!(!home.is_loading());
        assert_eq!(content.units.len(), 2);
        assert_eq!(content.academy_products.len(), 3);
    }
}
