//! Paged inventory table.

use crate::items::{ability_label, bonus_label, item_price, InventoryOwner, InventoryView, Item};

const HEADINGS: [&str; 5] = ["Name", "Bonus", "Type", "Ability", "Value"];

/// The current page of `items` as an aligned table. Equipped items are
/// marked with `*`; the number column is what the equip/use prompt takes.
pub fn inventory_table(items: &[Item], view: &InventoryView, owner: InventoryOwner) -> String {
    let entries = view.page_entries(items);
    if entries.is_empty() {
        return format!("No items ({}).", view.filter_label());
    }

    let rows: Vec<(String, [String; 5])> = entries
        .iter()
        .map(|&(number, index)| {
            let item = &items[index];
            let marker = if item.equipped { "*" } else { " " };
            (
                format!("{number:>3}{marker}"),
                [
                    item.display_name.clone(),
                    bonus_label(item),
                    item.item_type.name().to_string(),
                    ability_label(item).to_string(),
                    item_price(item, owner.value_factor()).to_string(),
                ],
            )
        })
        .collect();

    let mut widths = HEADINGS.map(str::len);
    for (_, cells) in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str("    ");
    for (heading, width) in HEADINGS.iter().zip(widths) {
        out.push_str(&format!(" {heading:<width$}"));
    }
    out.push('\n');
    for (number, cells) in &rows {
        out.push_str(number);
        for (cell, width) in cells.iter().zip(widths) {
            out.push_str(&format!(" {cell:<width$}"));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "Page {}/{} ({})",
        view.page + 1,
        view.page_count(items),
        view.filter_label()
    ));
    out
}
