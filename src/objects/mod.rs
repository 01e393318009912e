//! Non-graphical objects persisted as chunk streams
//!
//! Each object knows its own record layout and code table; the chunk codec
//! underneath only moves `(code, value)` pairs.

mod layer_state;
mod xrecord;

pub use layer_state::{
    read_layer_states, write_layer_states, LayerPropertiesFlags, LayerPropertiesRestoreFlags,
    LayerState, LayerStateProperties, END_OF_FILE, LAYER_STATE, LAYER_STATE_DICTIONARY,
};
pub use xrecord::{DictionaryCloningFlags, XRecord, XRecordEntry, XRecordValue, XRecordValueType};
