use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use radar_chart_renderer::config::Config;
use radar_chart_renderer::interaction::{ChartEvent, PointerPosition, RadarChart};
use radar_chart_renderer::ir::parse_series;
use radar_chart_renderer::layout::compute_layout;
use radar_chart_renderer::render::render_svg;
use radar_chart_renderer::scene::Scene;
use std::hint::black_box;

fn generated_series(series: usize, axes: usize) -> String {
    let mut records = Vec::with_capacity(series);
    for s in 0..series {
        let values: Vec<String> = (0..axes)
            .map(|a| {
                let value = ((s * 7 + a * 13) % 50) as f32 / 100.0;
                format!(r#"{{"axis":"Axis number {a}","value":{value},"id":"s{s}","name":"Series {s}"}}"#)
            })
            .collect();
        records.push(format!(r#"{{"values":[{}]}}"#, values.join(",")));
    }
    format!("[{}]", records.join(","))
}

fn bench_config() -> Config {
    let mut config = Config::default();
    config.layout.fast_text_metrics = true;
    config
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let config = bench_config();
    for (series, axes) in [(3, 8), (10, 24), (40, 64)] {
        let input = generated_series(series, axes);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{series}x{axes}")),
            &input,
            |b, data| b.iter(|| parse_series(black_box(data), &config.options).unwrap()),
        );
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = bench_config();
    for (series, axes) in [(3, 8), (10, 24), (40, 64)] {
        let dataset = parse_series(&generated_series(series, axes), &config.options).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{series}x{axes}")),
            &dataset,
            |b, data| {
                b.iter(|| {
                    compute_layout(
                        black_box(data),
                        &config.options,
                        &config.theme,
                        &config.layout,
                    )
                    .unwrap()
                })
            },
        );
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let config = bench_config();
    for (series, axes) in [(3, 8), (10, 24), (40, 64)] {
        let dataset = parse_series(&generated_series(series, axes), &config.options).unwrap();
        let layout = compute_layout(&dataset, &config.options, &config.theme, &config.layout).unwrap();
        let scene = Scene::build(&layout);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{series}x{axes}")),
            &(layout, scene),
            |b, (layout, scene)| {
                b.iter(|| render_svg(black_box(layout), scene, &config.theme, &config.render))
            },
        );
    }
    group.finish();
}

fn bench_hover(c: &mut Criterion) {
    let mut chart = RadarChart::from_json(&generated_series(40, 64), bench_config()).unwrap();
    let area = chart.scene().handles(0).unwrap().area;
    c.bench_function("hover_cycle_40x64", |b| {
        b.iter(|| {
            let over = chart.handle(ChartEvent::PointerOver {
                target: area,
                pointer: PointerPosition { x: 10.0, y: 10.0 },
            });
            let out = chart.handle(ChartEvent::PointerOut { target: area });
            black_box((over.len(), out.len()))
        })
    });
}

criterion_group!(benches, bench_parse, bench_layout, bench_render, bench_hover);
criterion_main!(benches);
