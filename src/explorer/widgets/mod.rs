//! Explorer UI widgets.
//!
//! Provides the navigation widgets of the explorer, including:
//! - ChoiceList: a searchable dropdown laid out inline
//!   - Click the filter box and type to narrow the entries
//!   - Click an entry to navigate to it

pub mod choice_list;

pub use choice_list::{
    ChoiceListFilter, ChoiceListHeader, ChoiceListKind, ChoiceListPlugin, ChoiceListRows,
    ChoiceRow, apply_choice_filters, spawn_choice_list, sync_choice_lists,
};
