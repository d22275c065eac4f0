use std::hint::black_box;
use std::time::Instant;

use flycam_camera::Camera;
use flycam_common::{Vector3, Viewport};
use flycam_render::{PipelineConfig, ProjectionParams, TransformPipeline};

fn demo_camera() -> Camera {
    Camera::new(
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, -0.5, 1.0),
        Vector3::Y,
        Viewport::new(1200, 720),
    )
    .expect("demo camera is valid")
}

fn bench_compose(iterations: usize) {
    let camera = demo_camera();
    let config = PipelineConfig::new()
        .with_rotation(Vector3::new(0.0, 30.0, 0.0))
        .with_translation(Vector3::new(0.0, 0.0, 6.0))
        .with_projection(ProjectionParams::new(1200.0, 720.0, 1.0, 100.0, 60.0));

    let start = Instant::now();
    for _ in 0..iterations {
        let wvp = TransformPipeline::new(black_box(&config))
            .with_camera(&camera)
            .compose();
        black_box(wvp.ok());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  compose ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_mouse_and_render(iterations: usize) {
    let mut camera = demo_camera();

    let start = Instant::now();
    for i in 0..iterations {
        let x = 200.0 + (i % 800) as f64;
        let _ = black_box(camera.mouse(x, 360.0));
        let _ = black_box(camera.render());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  mouse+render ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("flycam transform benchmarks");
    for n in [10_000, 100_000] {
        bench_compose(n);
        bench_mouse_and_render(n);
    }
}
