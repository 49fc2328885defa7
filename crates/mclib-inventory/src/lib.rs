//! Inventory / transaction model (§4.8): one `Inventory` per open window,
//! a cursor slot, and a per-inventory action-id counter used to correlate
//! `ClickWindow` with the server's `ConfirmTransaction` reply. Grounded in
//! `Inventory::PickUp`/`Place`/`HandleTransaction` and
//! `InventoryManager::HandlePacket` from the original client library.
//!
//! Unlike the original, `pick_up`/`place` never touch a connection
//! directly — they return the `ClickWindow` packet to send, or `None` on
//! the same failure conditions the original checks. The caller (the
//! client façade) owns actually writing it to the wire.

use std::collections::HashMap;

use mclib_protocol_core::InternalPacket;
use mclib_types::Slot;

/// Index at which the hotbar starts in the player's own inventory (window
/// id 0); everything below this is "inventory outside the hotbar".
pub const HOTBAR_SLOT_START: i32 = 36;

/// The window id the server always uses for the player's own inventory.
pub const PLAYER_INVENTORY_ID: i32 = 0;

/// One open window: its slot contents, held cursor item, and the next
/// action id to stamp onto an outbound `ClickWindow`.
#[derive(Debug, Clone)]
pub struct Inventory {
    window_id: i32,
    items: HashMap<i32, Slot>,
    cursor: Slot,
    next_action_id: i16,
}

impl Inventory {
    pub fn new(window_id: i32) -> Self {
        Self {
            window_id,
            items: HashMap::new(),
            cursor: Slot::empty(),
            next_action_id: 1,
        }
    }

    pub fn window_id(&self) -> i32 {
        self.window_id
    }

    pub fn cursor(&self) -> &Slot {
        &self.cursor
    }

    /// The slot at `index`, or an empty slot if nothing has been placed
    /// there yet (mirrors the original's `GetItem` default-constructed
    /// fallback rather than returning an `Option`).
    pub fn get_item(&self, index: i32) -> Slot {
        self.items.get(&index).cloned().unwrap_or_else(Slot::empty)
    }

    pub fn find_item_by_id(&self, item_id: i32) -> Option<i32> {
        self.items
            .iter()
            .find(|(_, slot)| slot.item_id == item_id)
            .map(|(index, _)| *index)
    }

    pub fn contains(&self, item_id: i32) -> bool {
        self.items.values().any(|slot| slot.item_id == item_id)
    }

    pub fn contains_at_least(&self, item_id: i32, amount: u8) -> bool {
        self.items
            .values()
            .any(|slot| slot.item_id == item_id && slot.count >= amount)
    }

    fn set_item(&mut self, index: i32, slot: Slot) {
        self.items.insert(index, slot);
    }

    /// The windowId a `ClickWindow` targeting `index` in this inventory
    /// should carry: the player's own inventory maps below-hotbar indices
    /// onto the special `-2` window id (§4.8).
    fn click_window_id(&self, index: i32) -> i32 {
        if self.window_id == PLAYER_INVENTORY_ID && index < HOTBAR_SLOT_START {
            -2
        } else {
            self.window_id
        }
    }

    /// Pick up the item at `index` onto the cursor. Fails (returns `None`,
    /// sends nothing) if the cursor already holds something or the target
    /// slot is empty.
    pub fn pick_up(&mut self, index: i32) -> Option<InternalPacket> {
        if !self.cursor.is_empty() {
            return None;
        }
        let item = self.items.get(&index)?.clone();
        let window_id = self.click_window_id(index);
        let action = self.next_action_id;
        self.next_action_id += 1;
        Some(InternalPacket::ClickWindow {
            window_id: window_id as i8,
            slot: index as i16,
            button: 0,
            action,
            mode: 0,
            clicked_item: item,
        })
    }

    /// Place the cursor item into `index`. Fails if the cursor is empty.
    /// The server's `SetSlot` reply is what actually updates cursor and
    /// slot contents, not this call.
    pub fn place(&mut self, index: i32) -> Option<InternalPacket> {
        if self.cursor.is_empty() {
            return None;
        }
        let window_id = self.click_window_id(index);
        let action = self.next_action_id;
        self.next_action_id += 1;
        Some(InternalPacket::ClickWindow {
            window_id: window_id as i8,
            slot: index as i16,
            button: 0,
            action,
            mode: 0,
            clicked_item: Slot::empty(),
        })
    }

    /// Not accepted: echo a negative `ConfirmTransaction` back so the
    /// server's pending-action counter desyncs in step with ours (§4.8).
    fn handle_transaction(&self, action: i16, accepted: bool) -> Option<InternalPacket> {
        if accepted {
            return None;
        }
        Some(InternalPacket::ConfirmTransactionServerbound {
            window_id: self.window_id as i8,
            action,
            accepted: false,
        })
    }
}

/// Every open window, keyed by server-assigned window id. Consumes
/// `SetSlot`/`WindowItems`/`OpenWindow`/`ConfirmTransaction` from the
/// dispatcher; the client façade is expected to register closures that
/// forward those packets here.
#[derive(Debug, Default)]
pub struct InventoryManager {
    inventories: HashMap<i32, Inventory>,
}

impl InventoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_inventory(&self, window_id: i32) -> Option<&Inventory> {
        self.inventories.get(&window_id)
    }

    pub fn get_inventory_mut(&mut self, window_id: i32) -> Option<&mut Inventory> {
        self.inventories.get_mut(&window_id)
    }

    pub fn player_inventory(&self) -> Option<&Inventory> {
        self.get_inventory(PLAYER_INVENTORY_ID)
    }

    pub fn player_inventory_mut(&mut self) -> Option<&mut Inventory> {
        self.get_inventory_mut(PLAYER_INVENTORY_ID)
    }

    fn inventory_entry(&mut self, window_id: i32) -> &mut Inventory {
        self.inventories
            .entry(window_id)
            .or_insert_with(|| Inventory::new(window_id))
    }

    /// `SetSlot(windowId=-1, slotIndex=-1, slot)` is the cursor update for
    /// the player inventory; any other `(windowId, slotIndex)` overwrites
    /// that slot directly, creating the window's `Inventory` on first use.
    pub fn handle_set_slot(&mut self, window_id: i8, slot_index: i16, slot: Slot) {
        if window_id < 0 && slot_index == -1 {
            self.inventory_entry(PLAYER_INVENTORY_ID).cursor = slot;
            return;
        }
        self.inventory_entry(window_id as i32)
            .set_item(slot_index as i32, slot);
    }

    /// Overwrites slot indices `[0, slots.len())` in one shot.
    pub fn handle_window_items(&mut self, window_id: u8, slots: &[Slot]) {
        let inventory = self.inventory_entry(window_id as i32);
        for (index, slot) in slots.iter().enumerate() {
            inventory.set_item(index as i32, slot.clone());
        }
    }

    /// Replaces any existing inventory at `windowId` with an empty one.
    pub fn handle_open_window(&mut self, window_id: u8) {
        tracing::debug!(window_id, "opening inventory window");
        self.inventories
            .insert(window_id as i32, Inventory::new(window_id as i32));
    }

    /// Routes a `ConfirmTransaction` to the matching inventory (if one is
    /// open) and returns the auto-reply packet to send, if any.
    pub fn handle_confirm_transaction(
        &mut self,
        window_id: u8,
        action: i16,
        accepted: bool,
    ) -> Option<InternalPacket> {
        match self.inventories.get(&(window_id as i32)) {
            Some(inventory) => inventory.handle_transaction(action, accepted),
            None if !accepted => Some(InternalPacket::ConfirmTransactionServerbound {
                window_id: window_id as i8,
                action,
                accepted: false,
            }),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_items_fills_from_zero() {
        let mut manager = InventoryManager::new();
        manager.handle_open_window(1);
        manager.handle_window_items(1, &[Slot::new(1, 1), Slot::new(2, 2)]);
        let inv = manager.get_inventory(1).unwrap();
        assert_eq!(inv.get_item(0).item_id, 1);
        assert_eq!(inv.get_item(1).item_id, 2);
        assert!(inv.get_item(2).is_empty());
    }

    #[test]
    fn test_set_slot_cursor_update() {
        let mut manager = InventoryManager::new();
        manager.handle_set_slot(-1, -1, Slot::new(5, 1));
        assert_eq!(manager.player_inventory().unwrap().cursor().item_id, 5);
    }

    #[test]
    fn test_pick_up_fails_on_empty_slot() {
        let mut manager = InventoryManager::new();
        manager.handle_open_window(0);
        let inv = manager.get_inventory_mut(0).unwrap();
        assert!(inv.pick_up(10).is_none());
    }

    #[test]
    fn test_pick_up_uses_outside_hotbar_window_id() {
        let mut manager = InventoryManager::new();
        manager.handle_open_window(0);
        manager.handle_window_items(0, &[Slot::new(1, 1)]);
        let inv = manager.get_inventory_mut(0).unwrap();
        match inv.pick_up(0).unwrap() {
            InternalPacket::ClickWindow { window_id, .. } => assert_eq!(window_id, -2),
            other => panic!("unexpected packet {other:?}"),
        }
    }

    #[test]
    fn test_pick_up_fails_when_cursor_occupied() {
        let mut manager = InventoryManager::new();
        manager.handle_open_window(0);
        manager.handle_window_items(0, &[Slot::new(1, 1)]);
        manager.handle_set_slot(-1, -1, Slot::new(99, 1));
        let inv = manager.get_inventory_mut(0).unwrap();
        assert!(inv.pick_up(0).is_none());
    }

    #[test]
    fn test_place_fails_on_empty_cursor() {
        let mut manager = InventoryManager::new();
        manager.handle_open_window(1);
        let inv = manager.get_inventory_mut(1).unwrap();
        assert!(inv.place(0).is_none());
    }

    #[test]
    fn test_confirm_transaction_not_accepted_echoes_reply() {
        let mut manager = InventoryManager::new();
        manager.handle_open_window(2);
        let reply = manager.handle_confirm_transaction(2, 7, false);
        match reply.unwrap() {
            InternalPacket::ConfirmTransactionServerbound {
                window_id,
                action,
                accepted,
            } => {
                assert_eq!(window_id, 2);
                assert_eq!(action, 7);
                assert!(!accepted);
            }
            other => panic!("unexpected packet {other:?}"),
        }
    }

    #[test]
    fn test_confirm_transaction_accepted_is_silent() {
        let mut manager = InventoryManager::new();
        manager.handle_open_window(3);
        assert!(manager.handle_confirm_transaction(3, 1, true).is_none());
    }

    #[test]
    fn test_open_window_replaces_existing_inventory() {
        let mut manager = InventoryManager::new();
        manager.handle_open_window(4);
        manager.handle_window_items(4, &[Slot::new(9, 1)]);
        manager.handle_open_window(4);
        assert!(manager.get_inventory(4).unwrap().get_item(0).is_empty());
    }
}
