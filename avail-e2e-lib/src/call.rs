use std::{collections::HashMap, fmt};

use crate::extrinsic::CallIndex;

pub const DATA_AVAILABILITY_PALLET: &str = "DataAvailability";
pub const SUBMIT_DATA_CALL: &str = "submit_data";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallName {
    pub pallet: String,
    pub call: String,
}

impl fmt::Display for CallName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.pallet, self.call)
    }
}

/// Two way mapping between call indices and pallet/call names.
#[derive(Debug, Clone, Default)]
pub struct CallRegistry {
    by_index: HashMap<CallIndex, CallName>,
    by_name: HashMap<CallName, CallIndex>,
}

impl CallRegistry {
    pub fn insert(&mut self, index: CallIndex, pallet: impl Into<String>, call: impl Into<String>) {
        let name = CallName {
            pallet: pallet.into(),
            call: call.into(),
        };
        self.by_name.insert(name.clone(), index);
        self.by_index.insert(index, name);
    }

    pub fn name(&self, index: &CallIndex) -> Option<&CallName> {
        self.by_index.get(index)
    }

    pub fn index(&self, pallet: &str, call: &str) -> Option<CallIndex> {
        self.by_name
            .get(&CallName {
                pallet: pallet.to_string(),
                call: call.to_string(),
            })
            .copied()
    }

    pub fn submit_data_index(&self) -> Option<CallIndex> {
        self.index(DATA_AVAILABILITY_PALLET, SUBMIT_DATA_CALL)
    }

    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

impl FromIterator<(CallIndex, String, String)> for CallRegistry {
    fn from_iter<T: IntoIterator<Item = (CallIndex, String, String)>>(iter: T) -> Self {
        let mut registry = CallRegistry::default();
        for (index, pallet, call) in iter {
            registry.insert(index, pallet, call);
        }
        registry
    }
}
