use criterion::{Criterion, black_box, criterion_group, criterion_main};

use umbra_graphics::{
    DummyBackend, InputLayoutDescriptor, SHADOW_INPUT_ELEMENTS, ShaderCompiler, ShaderDesc,
    ShadowVertexShader,
};

const SHADOW_WGSL: &str = include_str!("../tests/shaders/shadow.wgsl");

fn shadow_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/shaders/shadow.wgsl")
}

// ---------------------------------------------------------------------------
// Input layouts
// ---------------------------------------------------------------------------

fn bench_shadow_layout(c: &mut Criterion) {
    c.bench_function("input_layout_shadow_9_elements", |b| {
        b.iter(|| {
            let layout = InputLayoutDescriptor::from_elements(black_box(&SHADOW_INPUT_ELEMENTS))
                .unwrap();
            black_box(layout);
        });
    });
}

// ---------------------------------------------------------------------------
// Compilation
// ---------------------------------------------------------------------------

fn bench_compile_shadow_wgsl(c: &mut Criterion) {
    let compiler = ShaderCompiler::new();
    let desc = ShaderDesc::new("memory/shadow.wgsl", "vs_main", "vs_5_0");
    c.bench_function("compile_shadow_wgsl", |b| {
        b.iter(|| black_box(compiler.compile_source(black_box(SHADOW_WGSL), &desc).unwrap()));
    });
}

fn bench_initialize_dummy(c: &mut Criterion) {
    let backend = DummyBackend::new();
    c.bench_function("shadow_initialize_dummy", |b| {
        b.iter(|| {
            let mut shader = ShadowVertexShader::new(shadow_path(), "vs_main", "vs_5_0");
            shader.initialize(&backend).unwrap();
            backend.clear_calls();
            black_box(shader);
        });
    });
}

criterion_group!(
    benches,
    bench_shadow_layout,
    bench_compile_shadow_wgsl,
    bench_initialize_dummy,
);
criterion_main!(benches);
