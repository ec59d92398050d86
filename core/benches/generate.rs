use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use wordstack_core::*;

fn bench_deal(c: &mut Criterion) {
    let bag = LetterBag::standard();
    let mut group = c.benchmark_group("deal");
    for shape in [BoardShape::Main, BoardShape::Mini, BoardShape::Pyramid] {
        group.bench_function(format!("{:?}", shape), |b| {
            b.iter(|| {
                let mut rng = SeededRandom::new(black_box(20250314));
                BagGenerator::new(&bag, &mut rng, 20).generate(shape)
            })
        });
    }
    group.finish();
}

fn bench_wildcard_lookup(c: &mut Criterion) {
    let dictionary = WordSet::from_words(["QUARTZ", "ZEBRA", "JAZZY", "WIZARD"]);
    c.bench_function("two_wildcards_miss", |b| {
        b.iter(|| is_valid_word(&dictionary, black_box("W*Z*RX")))
    });
}

/// Selects and clears the whole top layer, with cascades on every deselect.
fn bench_select_cycle(c: &mut Criterion) {
    let date = DailyDate::parse("2025-03-14").unwrap();
    let mut session = Session::daily(&date, GameConfig::new(BoardShape::Pyramid), WordSet::default());
    let top: Vec<TileId> = session.board().layers()[0].tiles().iter().map(Tile::id).collect();
    let child = Coord3::new(3, 3, 1);

    c.bench_function("select_cycle", |b| {
        b.iter(|| {
            for &id in &top {
                session.activate(id).unwrap();
            }
            session.activate(child).unwrap();
            session.activate(top[0]).unwrap();
            session.clear_selection().unwrap();
        })
    });
}

criterion_group!(benches, bench_deal, bench_wildcard_lookup, bench_select_cycle);
criterion_main!(benches);
