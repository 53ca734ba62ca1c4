//! Stable identifier wrappers and insertion-ordered id pools.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Identifier types handed out by an [`Interner`].
pub trait PoolId: Copy {
    /// Creates an identifier from a pool position.
    fn from_index(index: u32) -> Self;
}

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(u32);

        impl $name {
            /// Creates an identifier from a raw value.
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Returns the raw identifier value.
            pub const fn value(self) -> u32 {
                self.0
            }
        }

        impl PoolId for $name {
            fn from_index(index: u32) -> Self {
                Self(index)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(RecipeId);
define_id!(KindId);
define_id!(MessageId);

/// Counter-plus-map pool: the first insertion of a key gets the next id.
#[derive(Debug, Clone)]
pub struct Interner<K, I> {
    ids: HashMap<K, I>,
    keys: Vec<K>,
}

impl<K, I> Default for Interner<K, I> {
    fn default() -> Self {
        Self {
            ids: HashMap::new(),
            keys: Vec::new(),
        }
    }
}

impl<K, I> Interner<K, I>
where
    K: Clone + Eq + Hash,
    I: PoolId,
{
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `key`, assigning the next one on first sight.
    pub fn intern(&mut self, key: K) -> I {
        if let Some(id) = self.ids.get(&key) {
            return *id;
        }
        let id = I::from_index(u32::try_from(self.keys.len()).unwrap_or(u32::MAX));
        self.ids.insert(key.clone(), id);
        self.keys.push(key);
        id
    }

    /// Looks up an already interned key.
    pub fn get<Q>(&self, key: &Q) -> Option<I>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.ids.get(key).copied()
    }

    /// Keys in id order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Number of interned keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` when nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
