use comfy_table::{ContentArrangement, Table};

use rf_mechanics::{Level, MasteryRank, compute_modifier, format_signed};

pub fn run(score: i32, mastery: &str, level: i32, equip: i32) -> Result<(), String> {
    let rank = MasteryRank::parse(mastery).ok_or_else(|| {
        format!("unknown mastery rank '{mastery}', use: untrained, trained, expert, master, legendary")
    })?;
    let level = Level::new(level).value();
    let total = compute_modifier(score, rank, level, equip);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Part", "Value"]);
    table.add_row(vec!["Ability".to_string(), format_signed(i64::from(score))]);
    table.add_row(vec![
        format!("Mastery ({rank})"),
        format_signed(i64::from(rank.bonus())),
    ]);
    table.add_row(vec!["Level".to_string(), format_signed(i64::from(level))]);
    table.add_row(vec!["Equipment".to_string(), format_signed(i64::from(equip))]);

    println!("{table}");
    println!();
    println!("  Modifier: {}", super::signed(i64::from(total)));
    Ok(())
}
