//! # Shadow Shader Demo
//!
//! Compiles a shadow vertex shader, creates the shader object and its input
//! layout on the selected backend, then prints the layout.
//!
//! ```bash
//! cargo run -p umbra-demos --bin shadow_shader -- --backend dummy
//! ```

use std::process::ExitCode;

use clap::Parser;
use umbra_demos::ShadowShaderArgs;
use umbra_graphics::{GraphicsInstance, ShaderDesc, ShadowVertexShader, profiling};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    profiling::start();

    let args = ShadowShaderArgs::parse();
    umbra_graphics::init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &ShadowShaderArgs) -> Result<(), umbra_graphics::GraphicsError> {
    let instance = GraphicsInstance::with_parameters(args.instance_parameters())?;

    let mut desc = ShaderDesc::new(&args.path, &args.entry, &args.profile);
    for dir in &args.include_dirs {
        desc = desc.with_include_dir(dir);
    }
    for (name, value) in args.parsed_defines() {
        desc = desc.with_define(name, value);
    }

    let mut shader = ShadowVertexShader::from_desc(desc);
    shader.initialize(instance.backend().as_ref())?;

    let Some(layout) = shader.input_layout() else {
        return Ok(());
    };
    let descriptor = layout.descriptor();

    println!(
        "{} ({}) on {}",
        args.path.display(),
        args.profile,
        instance.backend_name()
    );
    println!(
        "{:<4} {:<22} {:<10} {:>4} {:>6} {:<8}",
        "loc", "semantic", "format", "slot", "offset", "step"
    );
    for bound in &descriptor.elements {
        let element = &bound.element;
        println!(
            "{:<4} {:<22} {:<10} {:>4} {:>6} {:<8}",
            bound.location,
            element.to_string(),
            format!("{:?}", element.format),
            element.input_slot,
            bound.offset,
            format!("{:?}", element.step_mode),
        );
    }
    for (slot, buffer) in descriptor.buffers.iter().enumerate() {
        println!(
            "slot {slot}: stride {} bytes, {:?}",
            buffer.stride, buffer.step_mode
        );
    }

    Ok(())
}
