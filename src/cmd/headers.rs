use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use guise::{generate, generate_with, GenerationOptions, HeaderProfile};

use crate::OutputFormat;

pub fn cmd_headers(
    options: &GenerationOptions,
    count: usize,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let profiles: Vec<HeaderProfile> = match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..count).map(|_| generate_with(options, &mut rng)).collect()
        }
        None => (0..count).map(|_| generate(options)).collect(),
    };

    match format {
        OutputFormat::Json => {
            let json = if let [single] = profiles.as_slice() {
                serde_json::to_string_pretty(single)?
            } else {
                serde_json::to_string_pretty(&profiles)?
            };
            println!("{json}");
        }
        OutputFormat::Text => {
            for (i, profile) in profiles.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_profile(profile);
            }
        }
    }

    Ok(())
}

pub fn print_profile(profile: &HeaderProfile) {
    for (name, values) in profile.iter() {
        for value in values {
            println!("{name}: {value}");
        }
    }
}
