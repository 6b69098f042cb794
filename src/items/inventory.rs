//! Paged, filterable inventory views and the store that trades with the player.

use super::generation::generate_with_kinds;
use super::pricing::item_price;
use super::types::{Item, ItemKind};
use crate::character::Player;
use crate::core::constants::{BUY_VALUE_FACTOR, INVENTORY_PAGE_SIZE, SELL_VALUE_FACTOR};
use crate::core::dice::RandomSource;
use thiserror::Error;

/// Who holds the inventory being shown. Decides prices and actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryOwner {
    Player,
    Store,
}

impl InventoryOwner {
    /// The player sells at the low factor; the store charges the high one.
    pub fn value_factor(&self) -> u64 {
        match self {
            InventoryOwner::Player => SELL_VALUE_FACTOR,
            InventoryOwner::Store => BUY_VALUE_FACTOR,
        }
    }

    pub fn options(&self) -> &'static str {
        match self {
            InventoryOwner::Player => "(E)quip, (U)se, (P)rev, (N)ext, (F)ilter, (C)lose",
            InventoryOwner::Store => "(B)uy, (P)rev, (N)ext, (F)ilter, (C)lose",
        }
    }
}

/// Page and kind filter over an item list.
///
/// Item numbers shown on a page are 1-based positions in the filtered list,
/// so the same number always names the same item regardless of page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InventoryView {
    pub page: usize,
    pub filter: Option<ItemKind>,
}

impl InventoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions in `items` that pass the filter, in order.
    pub fn filtered_indices(&self, items: &[Item]) -> Vec<usize> {
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.filter.is_none() || self.filter == Some(item.kind))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn page_count(&self, items: &[Item]) -> usize {
        self.filtered_indices(items).len().div_ceil(INVENTORY_PAGE_SIZE).max(1)
    }

    /// `(display number, index into items)` for each row on the current page.
    pub fn page_entries(&self, items: &[Item]) -> Vec<(usize, usize)> {
        self.filtered_indices(items)
            .into_iter()
            .enumerate()
            .skip(self.page * INVENTORY_PAGE_SIZE)
            .take(INVENTORY_PAGE_SIZE)
            .map(|(position, index)| (position + 1, index))
            .collect()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self, items: &[Item]) -> bool {
        self.page + 1 < self.page_count(items)
    }

    pub fn previous_page(&mut self) -> bool {
        if self.has_previous() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self, items: &[Item]) -> bool {
        if self.has_next(items) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Pulls the page back onto the last one after items were removed.
    pub fn clamp_page(&mut self, items: &[Item]) {
        self.page = self.page.min(self.page_count(items) - 1);
    }

    /// all → weapon → armor → ring → usable → all. Resets to the first page.
    pub fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            None => Some(ItemKind::Weapon),
            Some(ItemKind::Weapon) => Some(ItemKind::Armor),
            Some(ItemKind::Armor) => Some(ItemKind::Ring),
            Some(ItemKind::Ring) => Some(ItemKind::Usable),
            Some(ItemKind::Usable) => None,
        };
        self.page = 0;
    }

    pub fn filter_label(&self) -> &'static str {
        self.filter.map_or("all", |kind| kind.name())
    }

    /// Maps a displayed item number back to an index into `items`.
    pub fn resolve_number(&self, items: &[Item], number: usize) -> Option<usize> {
        let filtered = self.filtered_indices(items);
        number.checked_sub(1).and_then(|position| filtered.get(position).copied())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeError {
    #[error("No such item")]
    NoSuchItem,
    #[error("You need {price} gold but have {gold}")]
    NotEnoughGold { price: u64, gold: u64 },
    #[error("You cannot sell an equipped item")]
    ItemEquipped,
}

/// A merchant's stock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    pub items: Vec<Item>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stock with up to `count` fresh items. Rolls that come up
    /// empty are not retried, so the store may hold fewer.
    pub fn restock(
        &mut self,
        level: u32,
        count: usize,
        forced_kinds: &[ItemKind],
        dice: &mut impl RandomSource,
    ) {
        self.items = (0..count)
            .filter_map(|_| generate_with_kinds(level, forced_kinds, dice))
            .collect();
        tracing::debug!(level, count, stocked = self.items.len(), "store restocked");
    }

    pub fn buy_price(&self, index: usize) -> Option<u64> {
        self.items
            .get(index)
            .map(|item| item_price(item, InventoryOwner::Store.value_factor()))
    }

    /// Moves the item at `index` to the player for its store price.
    pub fn buy(&mut self, index: usize, player: &mut Player) -> Result<u64, TradeError> {
        let price = self.buy_price(index).ok_or(TradeError::NoSuchItem)?;
        if player.gold < price {
            return Err(TradeError::NotEnoughGold {
                price,
                gold: player.gold,
            });
        }
        player.gold -= price;
        let mut item = self.items.remove(index);
        item.equipped = false;
        player.add_item(item);
        Ok(price)
    }

    /// Buys the player's item at `index` for its sell price.
    pub fn sell(&mut self, index: usize, player: &mut Player) -> Result<u64, TradeError> {
        let item = player.items.get(index).ok_or(TradeError::NoSuchItem)?;
        if item.equipped {
            return Err(TradeError::ItemEquipped);
        }
        let price = item_price(item, InventoryOwner::Player.value_factor());
        let item = player.remove_item(index).map_err(|_| TradeError::NoSuchItem)?;
        player.gold += price;
        self.items.push(item);
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::SeededDice;
    use crate::items::tables::find_template;

    fn item(name: &str) -> Item {
        find_template(name).expect("template exists").to_item()
    }

    fn many_items(count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| if i % 3 == 0 { item("Potion") } else { item("Club") })
            .collect()
    }

    #[test]
    fn test_paging() {
        let items = many_items(23);
        let mut view = InventoryView::new();
        assert_eq!(view.page_count(&items), 3);
        assert!(!view.has_previous());
        assert_eq!(view.page_entries(&items).len(), 10);

        assert!(view.next_page(&items));
        assert!(view.next_page(&items));
        assert!(!view.next_page(&items), "already on last page");
        let last = view.page_entries(&items);
        assert_eq!(last.len(), 3);
        assert_eq!(last[0], (21, 20));

        assert!(view.previous_page());
        assert_eq!(view.page, 1);
    }

    #[test]
    fn test_clamp_page_after_removal() {
        let mut items = many_items(11);
        let mut view = InventoryView::new();
        assert!(view.next_page(&items));
        view.clamp_page(&items);
        assert_eq!(view.page, 1);

        items.pop();
        view.clamp_page(&items);
        assert_eq!(view.page, 0);
        assert_eq!(view.page_entries(&items).len(), 10);
    }

    #[test]
    fn test_empty_inventory_has_one_page() {
        let view = InventoryView::new();
        assert_eq!(view.page_count(&[]), 1);
        assert!(view.page_entries(&[]).is_empty());
    }

    #[test]
    fn test_filter_cycle_resets_page() {
        let mut view = InventoryView { page: 2, filter: None };
        let expected = [
            Some(ItemKind::Weapon),
            Some(ItemKind::Armor),
            Some(ItemKind::Ring),
            Some(ItemKind::Usable),
            None,
        ];
        for kind in expected {
            view.cycle_filter();
            assert_eq!(view.filter, kind);
            assert_eq!(view.page, 0);
        }
    }

    #[test]
    fn test_number_maps_through_filter() {
        let items = vec![item("Club"), item("Potion"), item("Dagger"), item("Potion")];
        let view = InventoryView {
            page: 0,
            filter: Some(ItemKind::Usable),
        };
        assert_eq!(view.resolve_number(&items, 1), Some(1));
        assert_eq!(view.resolve_number(&items, 2), Some(3));
        assert_eq!(view.resolve_number(&items, 3), None);
        assert_eq!(view.resolve_number(&items, 0), None);
    }

    #[test]
    fn test_owner_factors() {
        assert!(InventoryOwner::Store.value_factor() > InventoryOwner::Player.value_factor());
        assert!(InventoryOwner::Store.options().contains("(B)uy"));
    }

    #[test]
    fn test_buy_and_sell() {
        let mut store = Store {
            items: vec![item("Longsword")],
        };
        let mut player = Player::new("Tess");

        assert_eq!(
            store.buy(0, &mut player).unwrap_err(),
            TradeError::NotEnoughGold { price: 150, gold: 0 }
        );

        player.gold = 200;
        assert_eq!(store.buy(0, &mut player), Ok(150));
        assert_eq!(player.gold, 50);
        assert!(store.items.is_empty());
        assert_eq!(player.items.len(), 3);

        assert_eq!(store.sell(0, &mut player).unwrap_err(), TradeError::ItemEquipped);
        assert_eq!(store.sell(2, &mut player), Ok(60));
        assert_eq!(player.gold, 110);
        assert_eq!(store.items.len(), 1);
        assert_eq!(store.sell(7, &mut player).unwrap_err(), TradeError::NoSuchItem);
    }

    #[test]
    fn test_restock_forced_kinds() {
        let mut store = Store::new();
        let mut dice = SeededDice::new(31);
        store.restock(12, 8, &[ItemKind::Weapon, ItemKind::Armor], &mut dice);
        assert!(store.items.len() <= 8);
        assert!(store
            .items
            .iter()
            .all(|item| matches!(item.kind, ItemKind::Weapon | ItemKind::Armor)));
    }
}
