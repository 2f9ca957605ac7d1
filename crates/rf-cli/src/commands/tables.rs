use comfy_table::{ContentArrangement, Table};

use rf_mechanics::{ATTACK_ABILITIES, AttackSlot, CheckKind, MasteryRank, format_signed};

pub fn run() -> Result<(), String> {
    let mut checks = Table::new();
    checks.set_content_arrangement(ContentArrangement::Dynamic);
    checks.set_header(vec!["Check", "Ability"]);
    for kind in CheckKind::all() {
        let ability = match kind.fixed_ability() {
            Some(ability) => ability.abbreviation().to_string(),
            None => ATTACK_ABILITIES
                .iter()
                .map(|a| a.abbreviation())
                .collect::<Vec<_>>()
                .join(" / "),
        };
        checks.add_row(vec![kind.label(), ability]);
    }
    println!("{checks}");
    println!();

    let mut ranks = Table::new();
    ranks.set_content_arrangement(ContentArrangement::Dynamic);
    ranks.set_header(vec!["Mastery", "Abbr.", "Bonus"]);
    for rank in MasteryRank::ALL {
        ranks.add_row(vec![
            rank.to_string(),
            rank.abbreviation().to_string(),
            format_signed(i64::from(rank.bonus())),
        ]);
    }
    println!("{ranks}");
    println!();
    println!(
        "  {} checks, {} attack slots",
        CheckKind::all().len(),
        AttackSlot::COUNT
    );
    Ok(())
}
