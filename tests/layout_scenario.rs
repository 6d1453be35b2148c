use fancy_barchart::color::{ColorPair, Rgb};
use fancy_barchart::layout::BarLayout;
use fancy_barchart::mixing::MixSpace;
use fancy_barchart::registry::PoolPolicy;
use fancy_barchart::shade::{HatchPattern, Style};
use fancy_barchart::{ChartError, ChartOptions, Dataset, plan, plan_with};
use serde_json::json;

fn reference() -> Dataset {
    Dataset::from_value(&json!({
        "group 1": {
            "bar 1": {
                "cat 1": [2, 3, 1],
                "cat 2": [1, 2, 1, 4, 5],
                "cat 3": [1, 1, 1, 1, 1, 1, 1]
            },
            "bar 2": {
                "cat 1": [4, 1],
                "cat 2": [3, 3, 3]
            }
        },
        "group 2": {
            "bar 1": {
                "cat 3": [2, 2],
                "cat 4": [5]
            },
            "bar 2": {
                "cat 1": [1, 1, 1, 1]
            }
        }
    }))
    .unwrap()
}

fn bar<'a>(plan: &'a fancy_barchart::Plan, group: &str, name: &str) -> &'a BarLayout {
    plan.layout.group(group).unwrap().bar(name).unwrap()
}

#[test]
fn reference_segments_and_totals() {
    let p = plan(&reference(), &ChartOptions::default()).unwrap();
    let b1 = bar(&p, "group 1", "bar 1");

    let cat1: Vec<(f64, f64)> = b1
        .segments
        .iter()
        .filter(|s| s.category == "cat 1")
        .map(|s| (s.width, s.offset))
        .collect();
    assert_eq!(cat1, vec![(2.0, 0.0), (3.0, 2.0), (1.0, 5.0)]);
    assert_eq!(b1.total, 26.0);
    assert_eq!(b1.segments.len(), 15);
    assert_eq!(p.layout.max_total(), 26.0);
}

#[test]
fn category_keeps_its_pair_across_bars_and_groups() {
    let p = plan(&reference(), &ChartOptions::default()).unwrap();
    let pair = p.colors.get("cat 1").unwrap();

    // tab20 pairs are consumed in order of first appearance.
    assert_eq!(
        pair,
        ColorPair::new(Rgb::new(0x1f, 0x77, 0xb4), Rgb::new(0xae, 0xc7, 0xe8))
    );
    assert_eq!(
        p.colors.get("cat 4").unwrap().primary,
        Rgb::new(0xd6, 0x27, 0x28)
    );

    // bar 1 is hatched: primary, secondary, primary.
    let hatched: Vec<Rgb> = bar(&p, "group 1", "bar 1")
        .segments
        .iter()
        .filter(|s| s.category == "cat 1")
        .map(|s| s.color)
        .collect();
    assert_eq!(hatched, vec![pair.primary, pair.secondary, pair.primary]);

    // bar 2 is a gradient: same endpoints.
    for group in ["group 1", "group 2"] {
        let grad: Vec<Rgb> = bar(&p, group, "bar 2")
            .segments
            .iter()
            .filter(|s| s.category == "cat 1")
            .map(|s| s.color)
            .collect();
        assert_eq!(grad.first(), Some(&pair.primary));
        assert_eq!(grad.last(), Some(&pair.secondary));
    }
}

#[test]
fn bar_name_keeps_its_style_across_groups() {
    let p = plan(&reference(), &ChartOptions::default()).unwrap();
    for name in ["bar 1", "bar 2"] {
        assert_eq!(
            bar(&p, "group 1", name).style,
            bar(&p, "group 2", name).style
        );
    }
    assert_eq!(bar(&p, "group 1", "bar 1").style, Style::Hatch);
    assert_eq!(bar(&p, "group 1", "bar 2").style, Style::Gradient);
    assert_eq!(p.styles.styles_used(), vec![Style::Hatch, Style::Gradient]);
}

#[test]
fn hatch_markers_follow_parity() {
    let p = plan(&reference(), &ChartOptions::default()).unwrap();
    let marks: Vec<_> = bar(&p, "group 1", "bar 1")
        .segments
        .iter()
        .filter(|s| s.category == "cat 2")
        .map(|s| s.hatch)
        .collect();
    use HatchPattern::*;
    assert_eq!(
        marks,
        vec![
            Some(Forward),
            Some(Backward),
            Some(Forward),
            Some(Backward),
            Some(Forward)
        ]
    );
    assert!(
        bar(&p, "group 1", "bar 2")
            .segments
            .iter()
            .all(|s| s.hatch.is_none())
    );
}

#[test]
fn planning_is_deterministic() {
    let opts = ChartOptions::default();
    let a = plan(&reference(), &opts).unwrap();
    let b = plan(&reference(), &opts).unwrap();
    assert_eq!(a.layout, b.layout);
    assert_eq!(
        a.colors.bindings().collect::<Vec<_>>(),
        b.colors.bindings().collect::<Vec<_>>()
    );
}

#[test]
fn seeded_registries_carry_bindings_into_the_next_chart() {
    let opts = ChartOptions::default();
    let first = plan(&reference(), &opts).unwrap();
    let (mut colors, mut styles) = (first.colors.clone(), first.styles.clone());

    // A second chart that meets the names in a different order.
    let second = Dataset::new()
        .with_values("other", "bar 2", "cat 4", [1.0])
        .with_values("other", "bar 2", "cat 1", [1.0])
        .with_values("other", "bar 1", "cat 5", [1.0]);
    let layout = plan_with(&second, &opts, &mut colors, &mut styles).unwrap();

    assert_eq!(colors.get("cat 1"), first.colors.get("cat 1"));
    assert_eq!(colors.get("cat 4"), first.colors.get("cat 4"));
    assert_eq!(layout.groups[0].bars[0].style, Style::Gradient);
    assert_eq!(colors.len(), 5);
}

#[test]
fn small_pool_fails_or_wraps() {
    let pairs: Vec<ColorPair> = (1..=3)
        .map(|i| ColorPair::new(Rgb::new(i, 0, 0), Rgb::WHITE))
        .collect();
    let mut opts = ChartOptions {
        pairs: Some(pairs),
        ..ChartOptions::default()
    };
    let err = plan(&reference(), &opts).unwrap_err();
    assert_eq!(
        err,
        ChartError::ColorPoolExhausted {
            needed: 4,
            available: 3
        }
    );

    opts.pool_policy = PoolPolicy::Wrap;
    let p = plan(&reference(), &opts).unwrap();
    assert_eq!(p.colors.get("cat 4"), p.colors.get("cat 1"));
}

#[test]
fn overrides_win_and_do_not_advance_the_cycle() {
    let opts: ChartOptions = serde_json::from_value(json!({
        "style_overrides": [{"name": "bar 2", "style": "hatch"}],
        "color_overrides": [{"name": "cat 2", "primary": "black", "secondary": "#808080"}]
    }))
    .unwrap();
    let p = plan(&reference(), &opts).unwrap();
    assert_eq!(bar(&p, "group 1", "bar 2").style, Style::Hatch);
    assert_eq!(bar(&p, "group 1", "bar 1").style, Style::Hatch);
    assert_eq!(p.colors.get("cat 2").unwrap().secondary, Rgb::new(128, 128, 128));
    // cat 3 takes the second tab20 pair since cat 2 never drew from the pool.
    assert_eq!(
        p.colors.get("cat 3").unwrap().primary,
        Rgb::new(0xff, 0x7f, 0x0e)
    );
}

#[test]
fn linear_and_perceptual_share_endpoints() {
    let d = Dataset::new()
        .with_values("g", "hatched", "c", [1.0])
        .with_values("g", "smooth", "c", [1.0, 1.0, 1.0]);
    for space in [MixSpace::Linear, MixSpace::Perceptual] {
        let opts = ChartOptions {
            mix_space: space,
            ..ChartOptions::default()
        };
        let p = plan(&d, &opts).unwrap();
        let pair = p.colors.get("c").unwrap();
        let colors: Vec<Rgb> = p.layout.groups[0].bars[1]
            .segments
            .iter()
            .map(|s| s.color)
            .collect();
        assert_eq!(colors[0], pair.primary, "{space:?}");
        assert_eq!(colors[2], pair.secondary, "{space:?}");
    }
}

#[test]
fn non_finite_values_are_rejected() {
    let d = Dataset::new()
        .with_values("g", "b", "c", [1.0])
        .with_values("g", "b", "d", [f64::NAN]);
    assert!(matches!(
        plan(&d, &ChartOptions::default()),
        Err(ChartError::Validation(_))
    ));
}

#[test]
fn failed_render_keeps_seeded_registries_as_they_were() {
    let pairs: Vec<ColorPair> = (1..=2)
        .map(|i| ColorPair::new(Rgb::new(i, 0, 0), Rgb::WHITE))
        .collect();
    let opts = ChartOptions {
        pairs: Some(pairs),
        ..ChartOptions::default()
    };
    let first = plan(&Dataset::new().with_values("g", "b", "a", [1.0]), &opts).unwrap();
    let (mut colors, mut styles) = (first.colors.clone(), first.styles.clone());

    let next = Dataset::new()
        .with_values("g", "new bar", "x", [1.0])
        .with_values("g", "new bar", "y", [1.0]);
    let err = plan_with(&next, &opts, &mut colors, &mut styles).unwrap_err();
    assert_eq!(
        err,
        ChartError::ColorPoolExhausted {
            needed: 3,
            available: 2
        }
    );
    assert_eq!(
        colors.bindings().collect::<Vec<_>>(),
        first.colors.bindings().collect::<Vec<_>>()
    );
    assert_eq!(
        styles.bindings().collect::<Vec<_>>(),
        first.styles.bindings().collect::<Vec<_>>()
    );
}

#[test]
fn exhaustion_reports_every_category() {
    let mut d = Dataset::new();
    for i in 0..10 {
        d.push("g", "b", &format!("cat {i}"), [1.0]);
    }
    let opts = ChartOptions {
        pairs: Some(vec![ColorPair::new(Rgb::BLACK, Rgb::WHITE); 3]),
        ..ChartOptions::default()
    };
    let err = plan(&d, &opts).unwrap_err();
    assert_eq!(
        err.to_string(),
        "color pool exhausted: 10 categories need a pair, but only 3 pairs are available"
    );
}
