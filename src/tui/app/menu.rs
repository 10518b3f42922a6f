use crate::amount::{format_integer, parse_amount};
use tracing::info;

use super::{AppState, Scene};

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Boards,
    BuyInUnit,
}

const MENU_ITEMS: [MenuItem; 2] = [MenuItem::Boards, MenuItem::BuyInUnit];

const BUY_IN_STEP: f64 = 5.0;

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::Boards => format!("Boards: {}", app.cfg_boards.count()),
            MenuItem::BuyInUnit => match app.cfg_buy_in.trim() {
                "" => "Buy-in: (none)".to_string(),
                unit => format!("Buy-in: {unit}"),
            },
        }
    }

    fn adjust(self, app: &mut AppState, delta: f64) {
        match self {
            MenuItem::Boards => app.cfg_boards = app.cfg_boards.toggled(),
            MenuItem::BuyInUnit => {
                let next = (parse_amount(&app.cfg_buy_in) + delta).max(0.0);
                app.cfg_buy_in = if next > 0.0 { format_integer(next) } else { String::new() };
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        if self.scene == Scene::Settings {
            self.cancel_menu();
        } else {
            self.open_menu();
        }
    }

    pub fn open_menu(&mut self) {
        self.close_help();
        self.menu_index = 0;
        self.cfg_boards = self.side_pot.boards();
        self.cfg_buy_in = self.payout.buy_in().to_string();
        if self.scene != Scene::Settings {
            self.return_scene = self.scene;
        }
        self.scene = Scene::Settings;
    }

    /// Push edited settings into both sheets and return to the last sheet.
    pub fn apply_menu(&mut self) -> bool {
        self.config.boards = self.cfg_boards;
        self.config.buy_in_unit = self.cfg_buy_in.clone();
        self.side_pot.set_boards(self.cfg_boards);
        self.payout.set_buy_in(self.cfg_buy_in.clone());
        info!(boards = self.cfg_boards.count(), buy_in = %self.cfg_buy_in, "settings applied");
        self.scene = self.return_scene;
        true
    }

    pub fn cancel_menu(&mut self) {
        self.scene = self.return_scene;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.adjust(self, BUY_IN_STEP);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.adjust(self, -BUY_IN_STEP);
    }
}
