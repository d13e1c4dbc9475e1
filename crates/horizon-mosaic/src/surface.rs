//! The composition surface: data source in, rendered sections out.
//!
//! [`CompositionSurface`] owns the moving parts of one sectioned screen:
//! the host's [`SectionDataSource`], the current [`Section`]s with their
//! identity [`Snapshot`], a lazy per-section geometry cache, the renderer
//! registry, and the pager wiring for paged sections. Hosts drive it in a
//! simple loop:
//!
//! 1. [`CompositionSurface::refresh`] pulls fresh sections, diffs them
//!    against what is on screen and hands back an [`UpdatePass`]
//! 2. the host animates or applies the pass, then calls
//!    [`CompositionSurface::updates_completed`]
//! 3. [`CompositionSurface::section_geometry`] and the `render_*` methods
//!    answer everything the host needs to put views on screen
//!
//! # Single writer
//!
//! Mutating methods take `&mut self`; one owner drives refreshes, applies
//! and environment changes. Concurrent refresh callers must serialize
//! through that owner, which is what makes the coalescing below airtight.
//!
//! # Refresh coalescing
//!
//! Between [`CompositionSurface::refresh`] returning a pass and the host
//! confirming it with [`CompositionSurface::updates_completed`], the
//! surface is *applying*. A refresh in that window does not diff again; it
//! returns [`RefreshOutcome::Coalesced`] and sets a flag. Any number of
//! refreshes in the window collapse into the single pass that runs when
//! the host confirms, so update storms settle in one extra diff.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use horizon_mosaic_core::logging::span_names;
use horizon_mosaic_core::{PerfSpan, Signal};

use crate::environment::{LayoutEnvironment, StyleHints};
use crate::error::{CompositionError, Result};
use crate::layout::{compute_section_geometry, SectionGeometry};
use crate::pager::PagerSubscription;
use crate::reconcile::{self, ChangeOp};
use crate::registry::RendererRegistry;
use crate::section::{DecorationKind, Section, SectionId};
use crate::snapshot::Snapshot;

/// Supplies sections to a [`CompositionSurface`].
///
/// Implementations are the host's model boundary: [`SectionDataSource::data`]
/// builds the full presentation from current model state, and the surface
/// diffs consecutive results, so building everything every time is the
/// intended usage, not a waste.
pub trait SectionDataSource: Send + Sync {
    /// Build the current sections, in presentation order.
    fn data(&self) -> Vec<Section>;

    /// The last item of `section` just came on screen.
    ///
    /// Hosts with incremental feeds kick off their next page load here.
    /// The default does nothing.
    fn pagination(&self, section: &SectionId, index: usize) {
        let _ = (section, index);
    }
}

/// Coarse lifecycle state of a surface, for placeholder UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceStatus {
    /// A load is running and nothing is on screen yet.
    InitialLoading,
    /// Content is on screen.
    Content,
    /// Content is on screen and another load is running behind it.
    LoadingMore,
    /// The last load succeeded but produced nothing to show.
    Empty,
    /// The last load failed and nothing is on screen.
    Failed,
}

/// One diffed batch of change operations, ready to animate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePass {
    /// Operations in canonical batch order.
    pub ops: Vec<ChangeOp>,
}

/// What a call to [`CompositionSurface::refresh`] did.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// Content changed; apply this pass, then confirm with
    /// [`CompositionSurface::updates_completed`].
    Applied(UpdatePass),
    /// A pass is mid-flight; the refresh will run after confirmation.
    Coalesced,
    /// Nothing to do.
    Idle,
}

/// A pager jump the host still has to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    /// The paged section to scroll.
    pub section: SectionId,
    /// Target page.
    pub page: usize,
}

/// Orchestrates data, diffing, layout and rendering for one screen.
///
/// `V` is the host's view value, as in [`RendererRegistry`].
pub struct CompositionSurface<V> {
    data_source: Arc<dyn SectionDataSource>,
    registry: RendererRegistry<V>,
    environment: LayoutEnvironment,
    sections: Vec<Section>,
    snapshot: Snapshot,
    geometry: Vec<Option<SectionGeometry>>,
    pager_wiring: Vec<PagerSubscription>,
    scroll_requests: Arc<Mutex<Vec<ScrollRequest>>>,
    applying: bool,
    pending_refresh: bool,
    loading: bool,
    load_succeeded: bool,
    status: SurfaceStatus,
    status_changed: Signal<SurfaceStatus>,
}

impl<V> CompositionSurface<V> {
    /// Create a surface with nothing on screen yet.
    ///
    /// No data is pulled here; call [`CompositionSurface::refresh`] to
    /// populate.
    pub fn new(
        data_source: Arc<dyn SectionDataSource>,
        registry: RendererRegistry<V>,
        environment: LayoutEnvironment,
    ) -> Self {
        Self {
            data_source,
            registry,
            environment,
            sections: Vec::new(),
            snapshot: Snapshot::empty(),
            geometry: Vec::new(),
            pager_wiring: Vec::new(),
            scroll_requests: Arc::new(Mutex::new(Vec::new())),
            applying: false,
            pending_refresh: false,
            loading: false,
            load_succeeded: true,
            status: SurfaceStatus::Empty,
            status_changed: Signal::new(),
        }
    }

    /// Pull fresh sections from the data source and diff them in.
    ///
    /// On [`RefreshOutcome::Applied`] the surface has already swapped to
    /// the new content; the pass describes the transition for animation,
    /// and the surface stays *applying* until
    /// [`CompositionSurface::updates_completed`]. Fails only on invalid
    /// data: duplicate section or item identities.
    pub fn refresh(&mut self) -> Result<RefreshOutcome> {
        if self.applying {
            self.pending_refresh = true;
            tracing::debug!(
                target: "horizon_mosaic::surface",
                "refresh while applying, coalesced"
            );
            return Ok(RefreshOutcome::Coalesced);
        }

        let _span = PerfSpan::new(span_names::REFRESH);
        let sections = self.data_source.data();
        let next = Snapshot::from_sections(&sections)?;
        let ops = reconcile::diff(&self.snapshot, &next);

        self.sections = sections;
        self.snapshot = next;
        self.geometry = vec![None; self.sections.len()];
        self.rebuild_pager_wiring();
        self.emit_status();

        if ops.is_empty() {
            tracing::debug!(target: "horizon_mosaic::surface", "refresh found no changes");
            return Ok(RefreshOutcome::Idle);
        }

        tracing::debug!(
            target: "horizon_mosaic::surface",
            sections = self.sections.len(),
            ops = ops.len(),
            "refresh produced update pass"
        );
        self.applying = true;
        Ok(RefreshOutcome::Applied(UpdatePass { ops }))
    }

    /// Confirm that the current [`UpdatePass`] is fully applied.
    ///
    /// Runs the one coalesced refresh if any arrived in the apply window;
    /// the return value is that refresh's outcome.
    pub fn updates_completed(&mut self) -> Result<RefreshOutcome> {
        self.applying = false;
        if !self.pending_refresh {
            return Ok(RefreshOutcome::Idle);
        }
        self.pending_refresh = false;
        tracing::debug!(
            target: "horizon_mosaic::surface",
            "running coalesced refresh"
        );
        self.refresh()
    }

    /// Whether an update pass is between [`CompositionSurface::refresh`]
    /// and [`CompositionSurface::updates_completed`].
    #[inline]
    pub fn is_applying(&self) -> bool {
        self.applying
    }

    /// Swap the layout environment, discarding all cached geometry.
    ///
    /// Content and identity are untouched; the next
    /// [`CompositionSurface::section_geometry`] call recomputes under the
    /// new environment.
    pub fn set_environment(&mut self, environment: LayoutEnvironment) {
        if self.environment == environment {
            return;
        }
        tracing::debug!(
            target: "horizon_mosaic::surface",
            width = environment.container.width,
            height = environment.container.height,
            size_class = ?environment.size_class,
            "environment changed, geometry reset"
        );
        self.environment = environment;
        self.geometry = vec![None; self.sections.len()];
    }

    /// The current layout environment.
    #[inline]
    pub fn environment(&self) -> LayoutEnvironment {
        self.environment
    }

    /// Hints for renderers under the current environment.
    #[inline]
    pub fn style_hints(&self) -> StyleHints {
        self.environment.style_hints()
    }

    /// The sections currently on screen, in presentation order.
    #[inline]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections on screen.
    #[inline]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Total number of items on screen.
    pub fn item_count(&self) -> usize {
        self.snapshot.item_count()
    }

    /// The identity snapshot of what is on screen.
    #[inline]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Geometry for one section, computed on first request and cached
    /// until content or environment changes.
    pub fn section_geometry(&mut self, index: usize) -> Result<&SectionGeometry> {
        if index >= self.sections.len() {
            return Err(CompositionError::SectionOutOfRange {
                index,
                count: self.sections.len(),
            });
        }
        let sections = &self.sections;
        let environment = &self.environment;
        Ok(self.geometry[index].get_or_insert_with(|| {
            let _span = PerfSpan::new(span_names::LAYOUT);
            compute_section_geometry(&sections[index], environment)
        }))
    }

    /// Build the view for one item via the registered renderer.
    pub fn render_item(&self, section_index: usize, item_index: usize) -> Result<V> {
        let section = self.section_at(section_index)?;
        let item = section.items().get(item_index).ok_or_else(|| {
            CompositionError::ItemOutOfRange {
                section: section.id().clone(),
                index: item_index,
                count: section.items().len(),
            }
        })?;
        self.registry.render_item(item, &self.environment.style_hints())
    }

    /// Build the view for a section's header.
    pub fn render_header(&self, section_index: usize) -> Result<V> {
        let section = self.section_at(section_index)?;
        let kind = section
            .header()
            .map_or(DecorationKind::Header, |decoration| decoration.kind);
        self.registry
            .render_decoration(kind, section, &self.environment.style_hints())
    }

    /// Build the view for a section's footer.
    ///
    /// Dispatches on the declared footer kind, so a
    /// [`DecorationKind::PagerFooter`] reaches the pager-footer renderer.
    pub fn render_footer(&self, section_index: usize) -> Result<V> {
        let section = self.section_at(section_index)?;
        let kind = section
            .footer()
            .map_or(DecorationKind::Footer, |decoration| decoration.kind);
        self.registry
            .render_decoration(kind, section, &self.environment.style_hints())
    }

    /// Build the view for a section's badge.
    pub fn render_badge(&self, section_index: usize) -> Result<V> {
        let section = self.section_at(section_index)?;
        self.registry.render_decoration(
            DecorationKind::Badge,
            section,
            &self.environment.style_hints(),
        )
    }

    /// Tell the surface an item came on screen.
    ///
    /// When it is the section's last item, the data source's
    /// [`SectionDataSource::pagination`] hook runs so incremental feeds
    /// can extend themselves. Indices that no longer exist are ignored;
    /// display callbacks race with refreshes by nature.
    pub fn note_item_displayed(&self, section_index: usize, item_index: usize) {
        let Some(section) = self.sections.get(section_index) else {
            return;
        };
        if item_index + 1 != section.items().len() {
            return;
        }
        tracing::trace!(
            target: "horizon_mosaic::surface",
            section = %section.id(),
            index = item_index,
            "last item displayed"
        );
        self.data_source.pagination(section.id(), item_index);
    }

    /// Tell the surface a paged section's own scroll settled at `offset`.
    ///
    /// Converts the offset to a page and publishes it on the section's
    /// pager channel. Returns whether subscribers were notified (`false`
    /// for non-paged sections and for settles on the current page).
    pub fn observe_page_scroll(&mut self, section_index: usize, offset: f32) -> Result<bool> {
        let page = {
            let geometry = self.section_geometry(section_index)?;
            geometry.page_at_offset(offset)
        };
        let Some(page) = page else {
            return Ok(false);
        };
        match self.sections[section_index].pager() {
            Some(channel) => Ok(channel.publish_page_changed(page)),
            None => Ok(false),
        }
    }

    /// Drain the pager jumps requested since the last call.
    ///
    /// The surface queues a [`ScrollRequest`] whenever a pager channel's
    /// [`page_requested`](crate::PagerChannel::page_requested) side fires;
    /// the host performs the scrolls, then reports each settle through
    /// [`CompositionSurface::observe_page_scroll`].
    pub fn take_scroll_requests(&self) -> Vec<ScrollRequest> {
        std::mem::take(&mut *self.scroll_requests.lock())
    }

    /// Mark a load as started.
    pub fn begin_loading(&mut self) {
        self.loading = true;
        self.emit_status();
    }

    /// Mark the running load as finished.
    ///
    /// Call [`CompositionSurface::refresh`] around this as data arrives;
    /// the flag only feeds [`CompositionSurface::status`].
    pub fn finish_loading(&mut self, success: bool) {
        self.loading = false;
        self.load_succeeded = success;
        self.emit_status();
    }

    /// Current coarse lifecycle status.
    #[inline]
    pub fn status(&self) -> SurfaceStatus {
        self.status
    }

    /// Signal fired whenever [`CompositionSurface::status`] changes.
    #[inline]
    pub fn status_changed(&self) -> &Signal<SurfaceStatus> {
        &self.status_changed
    }

    fn section_at(&self, index: usize) -> Result<&Section> {
        self.sections
            .get(index)
            .ok_or(CompositionError::SectionOutOfRange {
                index,
                count: self.sections.len(),
            })
    }

    /// Reconnect the per-section pager channels into the request queue.
    ///
    /// Old subscriptions drop first, so channels that survived a snapshot
    /// swap do not end up notifying twice.
    fn rebuild_pager_wiring(&mut self) {
        self.pager_wiring.clear();
        for section in &self.sections {
            let Some(channel) = section.pager() else {
                continue;
            };
            let queue = self.scroll_requests.clone();
            let section_id = section.id().clone();
            self.pager_wiring
                .push(PagerSubscription::page_requested(
                    channel.clone(),
                    move |event| {
                        queue.lock().push(ScrollRequest {
                            section: section_id.clone(),
                            page: event.page,
                        });
                    },
                ));
        }
        if !self.pager_wiring.is_empty() {
            tracing::trace!(
                target: "horizon_mosaic::surface",
                channels = self.pager_wiring.len(),
                "pager wiring rebuilt"
            );
        }
    }

    fn derive_status(&self) -> SurfaceStatus {
        let has_content = self.snapshot.item_count() > 0;
        match (self.loading, has_content) {
            (true, false) => SurfaceStatus::InitialLoading,
            (true, true) => SurfaceStatus::LoadingMore,
            (false, true) => SurfaceStatus::Content,
            (false, false) => {
                if self.load_succeeded {
                    SurfaceStatus::Empty
                } else {
                    SurfaceStatus::Failed
                }
            }
        }
    }

    fn emit_status(&mut self) {
        let status = self.derive_status();
        if status == self.status {
            return;
        }
        tracing::debug!(
            target: "horizon_mosaic::surface",
            from = ?self.status,
            to = ?status,
            "surface status changed"
        );
        self.status = status;
        self.status_changed.emit(status);
    }
}

impl<V> fmt::Debug for CompositionSurface<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositionSurface")
            .field("sections", &self.sections.len())
            .field("items", &self.snapshot.item_count())
            .field("status", &self.status)
            .field("applying", &self.applying)
            .field("pending_refresh", &self.pending_refresh)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutStrategy;
    use crate::section::{Item, ItemId, ItemKind};
    use horizon_mosaic_core::Size;

    struct QueueSource {
        sections: Mutex<Vec<Section>>,
        pagination_calls: Mutex<Vec<(SectionId, usize)>>,
    }

    impl QueueSource {
        fn new(sections: Vec<Section>) -> Self {
            Self {
                sections: Mutex::new(sections),
                pagination_calls: Mutex::new(Vec::new()),
            }
        }

        fn set_sections(&self, sections: Vec<Section>) {
            *self.sections.lock() = sections;
        }
    }

    impl SectionDataSource for QueueSource {
        fn data(&self) -> Vec<Section> {
            self.sections.lock().clone()
        }

        fn pagination(&self, section: &SectionId, index: usize) {
            self.pagination_calls.lock().push((section.clone(), index));
        }
    }

    fn tasks(id: &str, item_ids: &[u64]) -> Section {
        let items = item_ids
            .iter()
            .map(|&i| Item::new(ItemId(i), ItemKind::Task, i))
            .collect();
        Section::new(id, ItemKind::Task, LayoutStrategy::plain_list(), items).unwrap()
    }

    fn surface(source: Arc<QueueSource>) -> CompositionSurface<String> {
        CompositionSurface::new(
            source,
            RendererRegistry::new(),
            LayoutEnvironment::new(Size::new(320.0, 640.0)),
        )
    }

    #[test]
    fn test_refresh_with_no_changes_is_idle() {
        let source = Arc::new(QueueSource::new(vec![tasks("a", &[1])]));
        let mut surface = surface(source);

        assert!(matches!(
            surface.refresh().unwrap(),
            RefreshOutcome::Applied(_)
        ));
        surface.updates_completed().unwrap();
        assert!(matches!(surface.refresh().unwrap(), RefreshOutcome::Idle));
        assert!(!surface.is_applying());
    }

    #[test]
    fn test_refreshes_coalesce_while_applying() {
        let source = Arc::new(QueueSource::new(vec![tasks("a", &[1])]));
        let mut surface = surface(source.clone());

        let first = surface.refresh().unwrap();
        assert!(matches!(first, RefreshOutcome::Applied(_)));
        assert!(surface.is_applying());

        // Two refreshes land while the pass is being applied.
        source.set_sections(vec![tasks("a", &[1, 2])]);
        assert!(matches!(
            surface.refresh().unwrap(),
            RefreshOutcome::Coalesced
        ));
        source.set_sections(vec![tasks("a", &[1, 2, 3])]);
        assert!(matches!(
            surface.refresh().unwrap(),
            RefreshOutcome::Coalesced
        ));

        // Confirmation runs exactly one deferred pass, against the latest
        // data.
        let deferred = surface.updates_completed().unwrap();
        match deferred {
            RefreshOutcome::Applied(pass) => assert_eq!(pass.ops.len(), 2),
            other => panic!("expected a deferred pass, got {other:?}"),
        }
        assert_eq!(surface.item_count(), 3);
    }

    #[test]
    fn test_environment_swap_recomputes_geometry() {
        let source = Arc::new(QueueSource::new(vec![tasks("a", &[1, 2])]));
        let mut surface = surface(source);
        surface.refresh().unwrap();
        surface.updates_completed().unwrap();

        let narrow = surface.section_geometry(0).unwrap().frames[0].width();
        surface.set_environment(LayoutEnvironment::new(Size::new(768.0, 640.0)));
        let wide = surface.section_geometry(0).unwrap().frames[0].width();
        assert_eq!(narrow, 320.0);
        assert_eq!(wide, 768.0);
    }

    #[test]
    fn test_geometry_index_is_validated() {
        let source = Arc::new(QueueSource::new(Vec::new()));
        let mut surface = surface(source);
        assert!(matches!(
            surface.section_geometry(0).unwrap_err(),
            CompositionError::SectionOutOfRange { index: 0, count: 0 }
        ));
    }

    #[test]
    fn test_last_item_display_triggers_pagination() {
        let source = Arc::new(QueueSource::new(vec![tasks("feed", &[1, 2, 3])]));
        let mut surface = surface(source.clone());
        surface.refresh().unwrap();
        surface.updates_completed().unwrap();

        surface.note_item_displayed(0, 0);
        surface.note_item_displayed(0, 1);
        assert!(source.pagination_calls.lock().is_empty());

        surface.note_item_displayed(0, 2);
        assert_eq!(
            *source.pagination_calls.lock(),
            vec![(SectionId::from("feed"), 2)]
        );

        // Stale indices are ignored.
        surface.note_item_displayed(5, 0);
        assert_eq!(source.pagination_calls.lock().len(), 1);
    }

    #[test]
    fn test_status_follows_loading_and_content() {
        let source = Arc::new(QueueSource::new(Vec::new()));
        let mut surface = surface(source.clone());
        assert_eq!(surface.status(), SurfaceStatus::Empty);

        surface.begin_loading();
        assert_eq!(surface.status(), SurfaceStatus::InitialLoading);

        source.set_sections(vec![tasks("a", &[1])]);
        surface.refresh().unwrap();
        assert_eq!(surface.status(), SurfaceStatus::LoadingMore);

        surface.finish_loading(true);
        assert_eq!(surface.status(), SurfaceStatus::Content);
    }

    #[test]
    fn test_failed_first_load() {
        let source = Arc::new(QueueSource::new(Vec::new()));
        let mut surface = surface(source);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        surface.status_changed().connect(move |status| {
            log.lock().push(*status);
        });

        surface.begin_loading();
        surface.finish_loading(false);
        assert_eq!(surface.status(), SurfaceStatus::Failed);
        assert_eq!(
            *seen.lock(),
            vec![SurfaceStatus::InitialLoading, SurfaceStatus::Failed]
        );
    }

    #[test]
    fn test_duplicate_identities_fail_the_refresh() {
        let source = Arc::new(QueueSource::new(vec![tasks("a", &[1]), tasks("a", &[2])]));
        let mut surface = surface(source);
        assert!(matches!(
            surface.refresh().unwrap_err(),
            CompositionError::DuplicateSection { .. }
        ));
        // Nothing was swapped in.
        assert_eq!(surface.section_count(), 0);
    }
}
