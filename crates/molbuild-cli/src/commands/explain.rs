use crate::cli::ExplainArgs;
use crate::error::{CliError, Result};
use molbuild::core::grammar::{SideToken, parse_name};
use molbuild::core::library::FragmentLibrary;
use molbuild::workflows::BuildError;
use tracing::error;

pub fn run(args: ExplainArgs) -> Result<()> {
    let library = FragmentLibrary::open(&args.store)?;

    let total = args.names.len();
    let mut failed = 0;
    for name in &args.names {
        match parse_name(name, library.catalog()).map_err(BuildError::from) {
            Ok(descriptor) => {
                println!("{name}");
                println!("  core:   {}", descriptor.core);
                println!("  left:   {}", render_side(&descriptor.left));
                println!("  middle: {}", render_side(&descriptor.middle));
                println!("  right:  {}", render_side(&descriptor.right));
                if descriptor.n > 1 {
                    println!("  chain:  n={}", descriptor.n);
                }
                if descriptor.m > 1 {
                    println!("  chain:  m={}", descriptor.m);
                }
                let (x, y, z) = descriptor.stacks;
                if x > 1 || y > 1 || z > 1 {
                    println!("  stack:  {x} x {y} x {z}");
                }
            }
            Err(e) => {
                failed += 1;
                error!("Cannot parse '{}': {}", name, e);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::Batch { failed, total });
    }
    Ok(())
}

fn render_side(side: &Option<Vec<SideToken>>) -> String {
    match side {
        None => "-".to_string(),
        Some(tokens) => tokens
            .iter()
            .map(|t| {
                if t.parent < 0 {
                    t.name.to_string()
                } else {
                    format!("{}<{}", t.name, t.parent)
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}
