//! Horizon Mosaic task-board example.
//!
//! Console walkthrough of the whole engine:
//! - A host data source with three mixed-kind sections
//! - Kind-dispatched string renderers for items and decorations
//! - Refresh/apply cycles and the minimal change operations they emit
//! - Per-section geometry queries
//! - A pager tap-and-settle round trip
//! - The loading status lifecycle and the pagination trigger
//!
//! Run with: cargo run -p horizon-mosaic --example task_board
//!
//! The engine logs through `tracing`; raise the filter to watch it work:
//! RUST_LOG=horizon_mosaic=trace cargo run -p horizon-mosaic --example task_board

use std::sync::Arc;

use horizon_mosaic::prelude::*;
use parking_lot::Mutex;

/// Host-side data source. Owns the sections and mutates them between
/// refreshes, the way an app would after a fetch completes.
struct Board {
    sections: Mutex<Vec<Section>>,
}

impl Board {
    fn new(sections: Vec<Section>) -> Arc<Self> {
        Arc::new(Self {
            sections: Mutex::new(sections),
        })
    }

    fn set(&self, sections: Vec<Section>) {
        *self.sections.lock() = sections;
    }
}

impl SectionDataSource for Board {
    fn data(&self) -> Vec<Section> {
        self.sections.lock().clone()
    }

    fn pagination(&self, section: &SectionId, index: usize) {
        println!("  pagination hook: '{section}' showed item {index}, host may fetch more");
    }
}

#[derive(Hash)]
struct Person {
    name: &'static str,
    role: &'static str,
}

#[derive(Hash)]
struct ProgressCard {
    title: &'static str,
    completed: u32,
    total: u32,
}

fn person(id: u64, name: &'static str, role: &'static str) -> Item {
    Item::new(ItemId(id), ItemKind::Person, Person { name, role })
}

fn card(id: u64, title: &'static str, completed: u32, total: u32) -> Item {
    Item::new(
        ItemId(id),
        ItemKind::TaskStatistics,
        ProgressCard {
            title,
            completed,
            total,
        },
    )
}

fn roster() -> Section {
    let people = vec![
        person(1, "Edda Lorentzen", "Team Lead"),
        person(2, "Viggo Brahe", "Backend Engineer"),
        person(3, "Sanna Lindgren", "Product Designer"),
    ];
    Section::new("people", ItemKind::Person, LayoutStrategy::grid(), people)
        .expect("uniform kinds")
        .with_header(Decoration::header())
}

fn sprint_cards(debt_done: u32) -> Vec<Item> {
    vec![
        card(20, "Sprint 21", 11, 16),
        card(21, "Sprint 22", 4, 19),
        card(22, "Tech debt", debt_done, 9),
    ]
}

fn carousel(cards: Vec<Item>, channel: &Arc<PagerChannel>) -> Section {
    Section::new(
        "statistics",
        ItemKind::TaskStatistics,
        LayoutStrategy::paged_list(),
        cards,
    )
    .expect("uniform kinds")
    .with_footer(Decoration::pager_footer())
    .with_pager(channel.clone())
}

fn backlog(ids: &[u64]) -> Section {
    Section::new(
        "tasks",
        ItemKind::Task,
        LayoutStrategy::plain_list(),
        ids.iter()
            .map(|&id| Item::new(ItemId(id), ItemKind::Task, id))
            .collect(),
    )
    .expect("uniform kinds")
    .with_header(Decoration::header())
}

fn registry() -> RendererRegistry<String> {
    let mut registry = RendererRegistry::new();
    registry.register_item(ItemKind::Person, |item, _| {
        let person = item.payload_as::<Person>().expect("person payload");
        format!("{} ({})", person.name, person.role)
    });
    registry.register_item(ItemKind::Task, |item, _| format!("task {}", item.id()));
    registry.register_item(ItemKind::TaskStatistics, |item, _| {
        let card = item.payload_as::<ProgressCard>().expect("card payload");
        format!("{}: {}/{}", card.title, card.completed, card.total)
    });
    registry.register_decoration(DecorationKind::Header, |section, _| {
        format!("== {} ==", section.id())
    });
    registry.register_decoration(DecorationKind::PagerFooter, |section, _| {
        format!("(page dots for '{}')", section.id())
    });
    registry
}

fn print_rendered(surface: &CompositionSurface<String>) -> Result<(), CompositionError> {
    for index in 0..surface.section_count() {
        let section = &surface.sections()[index];
        if section.header().is_some() {
            println!("  {}", surface.render_header(index)?);
        }
        for item_index in 0..section.items().len() {
            println!("    {}", surface.render_item(index, item_index)?);
        }
        if section.footer().is_some() {
            println!("  {}", surface.render_footer(index)?);
        }
    }
    Ok(())
}

fn main() -> Result<(), CompositionError> {
    // Initialize logging; quiet by default, RUST_LOG raises it.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("horizon_mosaic=info")),
        )
        .init();

    let channel = Arc::new(PagerChannel::new());
    let board = Board::new(vec![
        roster(),
        carousel(sprint_cards(2), &channel),
        backlog(&[30, 31, 32]),
    ]);

    let mut surface = CompositionSurface::new(
        board.clone(),
        registry(),
        LayoutEnvironment::new(Size::new(375.0, 812.0)),
    );
    surface
        .status_changed()
        .connect(|status| println!("  status -> {status:?}"));

    println!("first load:");
    surface.begin_loading();
    let RefreshOutcome::Applied(pass) = surface.refresh()? else {
        unreachable!("first refresh always has content");
    };
    println!("  pass carries {} operations", pass.ops.len());
    surface.updates_completed()?;
    surface.finish_loading(true);

    println!();
    println!("rendered board:");
    print_rendered(&surface)?;

    println!();
    println!("geometry at 375x812:");
    for index in 0..surface.section_count() {
        let id = surface.sections()[index].id().clone();
        let geometry = surface.section_geometry(index)?;
        println!(
            "  {id}: {} frames, content {:.0}x{:.0}, scroll {:?}, {} pages",
            geometry.frames.len(),
            geometry.content_size.width,
            geometry.content_size.height,
            geometry.scroll,
            geometry.page_count,
        );
    }

    println!();
    println!("tap the third page dot:");
    channel.request_page(2);
    for request in surface.take_scroll_requests() {
        println!("  scroll command: '{}' -> page {}", request.section, request.page);
    }
    let offset = surface
        .section_geometry(1)?
        .offset_for_page(2)
        .expect("page in range");
    let crossed = surface.observe_page_scroll(1, offset)?;
    println!("  settled at offset {offset:.0}, boundary crossed: {crossed}");
    println!("  footer reads {}", surface.render_footer(1)?);

    println!();
    println!("a task is finished, the debt card ticks up:");
    board.set(vec![
        roster(),
        carousel(sprint_cards(3), &channel),
        backlog(&[32, 30]),
    ]);
    let RefreshOutcome::Applied(pass) = surface.refresh()? else {
        unreachable!("the board changed");
    };
    println!("  minimal pass ({} ops):", pass.ops.len());
    for op in &pass.ops {
        println!("    {op:?}");
    }
    surface.updates_completed()?;

    println!();
    println!("rendered board after the update:");
    print_rendered(&surface)?;

    println!();
    println!("scroll to the end of the backlog:");
    let last = surface.sections()[2].items().len() - 1;
    surface.note_item_displayed(2, last);

    Ok(())
}
