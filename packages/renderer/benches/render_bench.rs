use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mediakit_common::SequentialIdGenerator;
use mediakit_editor::{commands, drag, Action, ComponentData, DropPosition, SectionType, StateManager};
use mediakit_renderer::{diff_vdocument, export_html, Renderer};
use serde_json::json;

const TYPES: [&str; 6] = ["hero", "biography", "topics", "contact", "cta", "testimonials"];

fn build_layout(sections: usize, per_section: usize) -> (StateManager, Vec<String>) {
    let mut store = StateManager::default();
    let ids = SequentialIdGenerator::new();
    let mut created = Vec::new();

    for _ in 0..sections {
        let Some(section_id) = commands::add_section(&mut store, &ids, SectionType::TwoColumn) else {
            continue;
        };
        for i in 0..per_section {
            let mut data = ComponentData::new();
            data.insert("title".into(), json!(format!("Component {}", i)));
            data.insert("topics".into(), json!(["Rust", "WebAssembly", "Design systems"]));
            if let Some(id) =
                commands::add_component(&mut store, &ids, TYPES[i % TYPES.len()], data, Some(&section_id))
            {
                created.push(id);
            }
        }
    }
    (store, created)
}

fn render_layout(c: &mut Criterion) {
    let (store, _) = build_layout(5, 10);
    let renderer = Renderer::default();

    c.bench_function("render_50_components", |b| {
        b.iter(|| renderer.render(black_box(store.state())))
    });
}

fn diff_after_reorder(c: &mut Criterion) {
    let (mut store, ids) = build_layout(5, 10);
    let renderer = Renderer::default();
    let before = renderer.render(store.state());

    if let Some(sections) =
        drag::move_component(store.state(), &ids[ids.len() - 1], &ids[0], DropPosition::Before)
    {
        store.dispatch(Action::UpdateSections(sections));
    }
    let after = renderer.render(store.state());

    c.bench_function("diff_cross_section_move", |b| {
        b.iter(|| diff_vdocument(black_box(&before), black_box(&after)))
    });
}

fn export_page(c: &mut Criterion) {
    let (store, _) = build_layout(5, 10);
    let renderer = Renderer::default();

    c.bench_function("export_html_50_components", |b| {
        b.iter(|| export_html(black_box(store.state()), &renderer))
    });
}

criterion_group!(benches, render_layout, diff_after_reorder, export_page);
criterion_main!(benches);
