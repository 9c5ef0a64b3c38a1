//! Formatting

use crate::Array;
use std::fmt::{self, Debug, Display};

/// `<'Array' At 0x... [e0, e1]>`, each element through its own show
/// capability.
impl Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<'{}' At {:p} [", Self::NAME, self)?;
        for (index, element) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }
        f.write_str("]>")
    }
}

impl Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("element_type", &self.element_type().name())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show() {
        let a = Array::from_slice(&[32i64, 6]).unwrap();
        let shown = a.to_string();
        assert!(shown.starts_with("<'Array' At 0x"));
        assert!(shown.ends_with(" [32, 6]>"));

        let empty = Array::of::<char>();
        assert!(empty.to_string().ends_with(" []>"));
    }

    #[test]
    fn test_debug() {
        let a = Array::from_slice(&['a']).unwrap();
        assert_eq!(
            format!("{a:?}"),
            "Array { element_type: \"Char\", len: 1, capacity: 1 }"
        );
    }
}
