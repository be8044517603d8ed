//! Interned symbols for cheap identifier equality and low memory traffic.
//!
//! Every identifier leaf in an expression tree is a [`Sym`]: a lightweight
//! handle to a deduplicated `Arc<str>`. Interning the same spelling twice
//! yields the same allocation, so equality is usually a pointer comparison.
//! Equality never *depends* on interner state, though: handles from
//! different interners fall back to content comparison, which keeps `Sym`
//! behaving exactly like the string it names.
//!
//! Gensyms (`##base#N`) are minted through [`Sym::fresh`] from a global
//! atomic counter and are recognizable via [`Sym::is_gensym`].

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// An interned identifier.
///
/// `Sym` is a thin wrapper around an `Arc<str>`. Cloning is a reference
/// count bump; comparing two handles from the global interner is a pointer
/// comparison. Two `Sym`s are equal if and only if their spellings are
/// equal.
#[derive(Clone)]
pub struct Sym {
    inner: Arc<str>,
}

impl Sym {
    /// Intern `name` in the global interner and return its handle.
    #[inline]
    #[must_use]
    pub fn new(name: &str) -> Self {
        intern(name)
    }

    /// Intern an owned `String`, avoiding a copy when it is not yet known.
    #[inline]
    #[must_use]
    pub fn from_owned(name: String) -> Self {
        intern_owned(name)
    }

    /// Mint a fresh symbol guaranteed distinct from every other symbol.
    ///
    /// The spelling is `##base#N` where `N` comes from a process-wide
    /// counter. Fresh symbols intern like any other, so the usual equality
    /// and hashing rules apply.
    #[must_use]
    pub fn fresh(base: &str) -> Self {
        let n = GENSYM_COUNTER.fetch_add(1, Ordering::Relaxed);
        intern_owned(format!("##{base}#{n}"))
    }

    /// Get the spelling.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Get the length of the spelling in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check whether the spelling is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Whether this symbol was minted by [`Sym::fresh`] (or spells like one).
    #[inline]
    #[must_use]
    pub fn is_gensym(&self) -> bool {
        self.inner.starts_with("##")
    }

    /// The base name a gensym was minted from.
    ///
    /// `##loop#17` yields `Some("loop")`. Returns `None` for ordinary
    /// symbols and for gensym-looking spellings with no counter part.
    #[must_use]
    pub fn gensym_base(&self) -> Option<&str> {
        let rest = self.inner.strip_prefix("##")?;
        let hash = rest.rfind('#')?;
        let (base, counter) = rest.split_at(hash);
        if base.is_empty() || counter.len() < 2 || !counter[1..].bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        Some(base)
    }

    /// Get a clone of the underlying `Arc`.
    ///
    /// This bumps the reference count rather than allocating, so the
    /// pointer identity of the spelling is preserved.
    #[inline]
    #[must_use]
    pub fn get_arc(&self) -> Arc<str> {
        self.inner.clone()
    }
}

static GENSYM_COUNTER: AtomicU64 = AtomicU64::new(1);

impl PartialEq for Sym {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        // Pointer fast path for handles from the same interner.
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

impl Eq for Sym {}

impl Hash for Sym {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Content hash, consistent with Eq and with Borrow<str> lookups.
        self.inner.hash(state);
    }
}

impl Borrow<str> for Sym {
    #[inline]
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for Sym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sym({:?})", self.as_str())
    }
}

impl fmt::Display for Sym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Sym {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::ops::Deref for Sym {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl PartialEq<str> for Sym {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Sym {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<String> for Sym {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other
    }
}

impl From<&str> for Sym {
    #[inline]
    fn from(s: &str) -> Self {
        Sym::new(s)
    }
}

impl From<String> for Sym {
    #[inline]
    fn from(s: String) -> Self {
        Sym::from_owned(s)
    }
}

/// Thread-safe symbol interner.
///
/// The interner maintains a set of unique spellings and returns handles to
/// them. Interning the same spelling repeatedly returns the same handle.
pub struct SymInterner {
    map: RwLock<FxHashMap<Arc<str>, Sym>>,
}

impl SymInterner {
    /// Create a new, empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: RwLock::new(FxHashMap::default()),
        }
    }

    /// Create an interner with preallocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: RwLock::new(FxHashMap::with_capacity_and_hasher(
                capacity,
                Default::default(),
            )),
        }
    }

    /// Intern a spelling, returning a handle.
    ///
    /// If the spelling has been interned before, the same handle is
    /// returned. This method is thread-safe.
    pub fn intern(&self, s: &str) -> Sym {
        // Fast path: already interned, read lock only.
        {
            let map = self.map.read();
            if let Some(sym) = map.get(s) {
                return sym.clone();
            }
        }

        let mut map = self.map.write();

        // Double-check after acquiring the write lock.
        if let Some(sym) = map.get(s) {
            return sym.clone();
        }

        let arc: Arc<str> = s.into();
        let sym = Sym { inner: arc.clone() };
        map.insert(arc, sym.clone());
        sym
    }

    /// Intern an owned `String`, reusing its allocation when new.
    pub fn intern_owned(&self, s: String) -> Sym {
        {
            let map = self.map.read();
            if let Some(sym) = map.get(s.as_str()) {
                return sym.clone();
            }
        }

        let mut map = self.map.write();

        if let Some(sym) = map.get(s.as_str()) {
            return sym.clone();
        }

        let arc: Arc<str> = s.into();
        let sym = Sym { inner: arc.clone() };
        map.insert(arc, sym.clone());
        sym
    }

    /// Get an already-interned spelling without inserting.
    #[must_use]
    pub fn get(&self, s: &str) -> Option<Sym> {
        self.map.read().get(s).cloned()
    }

    /// Check whether a spelling has been interned.
    #[must_use]
    pub fn contains(&self, s: &str) -> bool {
        self.map.read().contains_key(s)
    }

    /// Number of interned spellings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    /// Check whether the interner is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}

impl Default for SymInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SymInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymInterner")
            .field("count", &self.map.read().len())
            .finish()
    }
}

/// The process-wide interner backing [`Sym::new`].
pub static GLOBAL_INTERNER: std::sync::LazyLock<SymInterner> =
    std::sync::LazyLock::new(SymInterner::new);

/// Intern a spelling in the global interner.
#[inline]
pub fn intern(s: &str) -> Sym {
    GLOBAL_INTERNER.intern(s)
}

/// Intern an owned spelling in the global interner.
#[inline]
pub fn intern_owned(s: String) -> Sym {
    GLOBAL_INTERNER.intern_owned(s)
}
