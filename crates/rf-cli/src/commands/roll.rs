use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use rf_mechanics::{DetailedRoll, RollResult, parse_formula};

use super::{die_value, signed};

pub fn run(input: &str, seed: Option<u64>, json: bool) -> Result<(), String> {
    let (pool, modifier) = parse_formula(input).map_err(|e| e.to_string())?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let result = rf_mechanics::roll(&pool, modifier, &mut rng).map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        print_result(&result);
    }
    Ok(())
}

fn print_result(result: &RollResult) {
    println!("  {}", result.formula.bold());
    for (face, values) in result.breakdown() {
        let rendered: Vec<String> = values
            .iter()
            .map(|&value| die_value(&DetailedRoll { face, value }).to_string())
            .collect();
        println!("  {:<5} [{}]", format!("{face}:"), rendered.join(", "));
    }
    if result.modifier != 0 {
        println!("  modifier: {}", signed(i64::from(result.modifier)));
    }
    println!("  {} {}", "Total:".bold(), result.total.to_string().bold());

    let (hits, misses) = result.criticals();
    if hits > 0 {
        println!("  {}", "Natural 20!".green().bold());
    }
    if misses > 0 {
        println!("  {}", "Natural 1!".red().bold());
    }
}
