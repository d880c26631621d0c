use crate::cli::BuildArgs;
use crate::error::{CliError, Result};
use molbuild::core::io::gjf::{GjfFile, GjfMetadata, JobSettings};
use molbuild::core::io::mol2::Mol2File;
use molbuild::core::io::traits::MolecularWriter;
use molbuild::core::library::FragmentLibrary;
use molbuild::core::models::molecule::Molecule;
use molbuild::workflows::build_molecule;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use tracing::{debug, error, info};

pub fn run(args: BuildArgs) -> Result<()> {
    let library = FragmentLibrary::open(&args.store)?;
    let settings = match &args.settings {
        Some(path) => JobSettings::from_toml_path(path)?,
        None => JobSettings::default(),
    };
    fs::create_dir_all(&args.output_dir)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let total = args.names.len();
    let mut failed = 0;
    for name in &args.names {
        match build_one(name, &library, &settings, &args, &mut rng) {
            Ok(molecule) => {
                info!(
                    "Built '{}': {} ({} atoms, {} bonds).",
                    name,
                    molecule.formula(),
                    molecule.atoms().len(),
                    molecule.bonds().len()
                );
            }
            Err(e) => {
                failed += 1;
                error!("Build of '{}' failed: {}", name, e);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::Batch { failed, total });
    }
    Ok(())
}

fn build_one(
    name: &str,
    library: &FragmentLibrary,
    settings: &JobSettings,
    args: &BuildArgs,
    rng: &mut StdRng,
) -> Result<Molecule> {
    let mut molecule = build_molecule(name, library)?;

    if let Some(delta) = args.perturb {
        debug!("Perturbing '{}' coordinates by up to {} A.", name, delta);
        molecule.perturb(delta, rng);
    }

    if args.format.wants_gjf() {
        let metadata = GjfMetadata {
            name: name.to_string(),
            settings: settings.clone(),
        };
        let path = args.output_dir.join(format!("{name}.gjf"));
        GjfFile::write_to_path(&molecule, &metadata, &path)?;
        debug!("Wrote {}.", path.display());
    }
    if args.format.wants_mol2() {
        let path = args.output_dir.join(format!("{name}.mol2"));
        Mol2File::write_to_path(&molecule, &name.to_string(), &path)?;
        debug!("Wrote {}.", path.display());
    }

    Ok(molecule)
}
