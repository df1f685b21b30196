//! Record trait and field accessors

use std::fmt;

/// A structurally comparable value describing one persisted entity.
///
/// Equality is by value. Fields that may be absent are modelled as
/// `Option<T>`, so "both absent" compares equal and "one absent" compares
/// different.
pub trait Record: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

impl<T> Record for T where T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {}

/// Named accessor for one tracked field of a record.
///
/// ```
/// use editstate::state::Field;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Profile {
///     name: Option<String>,
/// }
///
/// const NAME: Field<Profile, Option<String>> =
///     Field::new("name", |p| &p.name, |p| &mut p.name);
///
/// let profile = Profile { name: None };
/// assert_eq!(NAME.name(), "name");
/// assert!(NAME.get(&profile).is_none());
/// ```
pub struct Field<R, T> {
    name: &'static str,
    get: fn(&R) -> &T,
    get_mut: fn(&mut R) -> &mut T,
}

impl<R, T> Field<R, T> {
    pub const fn new(
        name: &'static str,
        get: fn(&R) -> &T,
        get_mut: fn(&mut R) -> &mut T,
    ) -> Self {
        Self { name, get, get_mut }
    }

    /// Field name reported in `FieldChanged` events
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get<'a>(&self, record: &'a R) -> &'a T {
        (self.get)(record)
    }

    pub(crate) fn get_mut<'a>(&self, record: &'a mut R) -> &'a mut T {
        (self.get_mut)(record)
    }
}

impl<R, T> Clone for Field<R, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, T> Copy for Field<R, T> {}

impl<R, T> fmt::Debug for Field<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("name", &self.name).finish()
    }
}
