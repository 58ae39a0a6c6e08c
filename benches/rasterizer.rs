use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use softrender::bench::{draw_triangle, FrameBuffer, VertexOut};
use softrender::colors::ColorRGB;
use softrender::light::DirectionalLight;
use softrender::math::vec2::Vec2;
use softrender::math::vec3::Vec3;
use softrender::math::vec4::Vec4;
use softrender::{MaterialSet, RenderConfig};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn vertex(depth: f32) -> VertexOut {
    VertexOut {
        position: Vec4::new(0.0, 0.0, depth, 1.0),
        uv: Vec2::new(0.5, 0.5),
        normal: Vec3::UP,
        tangent: Vec3::RIGHT,
        view_direction: Vec3::FORWARD,
        color: ColorRGB::WHITE,
    }
}

fn small_triangle() -> [Vec2; 3] {
    [
        Vec2::new(100.0, 100.0),
        Vec2::new(120.0, 100.0),
        Vec2::new(110.0, 120.0),
    ]
}

fn medium_triangle() -> [Vec2; 3] {
    [
        Vec2::new(100.0, 100.0),
        Vec2::new(300.0, 100.0),
        Vec2::new(200.0, 300.0),
    ]
}

fn large_triangle() -> [Vec2; 3] {
    [
        Vec2::new(50.0, 50.0),
        Vec2::new(750.0, 100.0),
        Vec2::new(400.0, 550.0),
    ]
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let materials = MaterialSet::neutral();
    let light = DirectionalLight::scene_default();
    let config = RenderConfig::default();
    let v = vertex(0.5);

    for (name, screen) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("shaded", name), &screen, |b, s| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                fb.reset_depth_buffer();
                draw_triangle(
                    &mut fb,
                    [&v, &v, &v],
                    black_box(*s),
                    &materials,
                    &light,
                    &config,
                );
            });
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    let materials = MaterialSet::neutral();
    let light = DirectionalLight::scene_default();
    let config = RenderConfig::default();
    let v = vertex(0.5);

    // Generate a grid of small triangles
    let triangles: Vec<[Vec2; 3]> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f32 * 40.0;
                let y = row as f32 * 30.0;
                [
                    Vec2::new(x, y),
                    Vec2::new(x + 35.0, y),
                    Vec2::new(x + 17.5, y + 25.0),
                ]
            })
        })
        .collect();

    group.bench_function("shaded_400_triangles", |b| {
        let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| {
            fb.reset_depth_buffer();
            for screen in &triangles {
                draw_triangle(
                    &mut fb,
                    [&v, &v, &v],
                    black_box(*screen),
                    &materials,
                    &light,
                    &config,
                );
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_many_triangles);
criterion_main!(benches);
