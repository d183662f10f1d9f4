use std::collections::TryReserveError;
use std::fmt;

/// A queue element: an owned copy of a string.
///
/// An element never aliases the text it was created from. Dropping it
/// releases the text.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Element {
    value: String,
}

impl Element {
    /// Copy `value` into a new element, or return an error if the copy
    /// cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Element;
    ///
    /// let element = Element::try_new("gerbil").unwrap();
    /// assert_eq!(element.value(), "gerbil");
    /// ```
    pub fn try_new(value: &str) -> Result<Self, TryReserveError> {
        let mut owned = String::new();
        owned.try_reserve_exact(value.len())?;
        owned.push_str(value);
        Ok(Self { value: owned })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    /// Copy the text into `buf` as a NUL-terminated byte string, truncated to
    /// `buf.len() - 1` bytes. Returns the number of text bytes copied, not
    /// counting the terminator. Nothing is written into an empty buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Element;
    ///
    /// let element = Element::try_new("dolphin").unwrap();
    /// let mut buf = [0xff_u8; 4];
    /// assert_eq!(element.copy_to(&mut buf), 3);
    /// assert_eq!(&buf, b"dol\0");
    /// ```
    pub fn copy_to(&self, buf: &mut [u8]) -> usize {
        let Some(capacity) = buf.len().checked_sub(1) else {
            return 0;
        };
        let copied = self.value.len().min(capacity);
        buf[..copied].copy_from_slice(&self.value.as_bytes()[..copied]);
        buf[copied] = 0;
        copied
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for Element {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::Element;

    #[test]
    fn copy_to_truncates_and_terminates() {
        let element = Element::try_new("abc").unwrap();

        let mut exact = [0xff_u8; 4];
        assert_eq!(element.copy_to(&mut exact), 3);
        assert_eq!(&exact, b"abc\0");

        let mut roomy = [0xff_u8; 6];
        assert_eq!(element.copy_to(&mut roomy), 3);
        assert_eq!(&roomy, b"abc\0\xff\xff");

        let mut single = [0xff_u8; 1];
        assert_eq!(element.copy_to(&mut single), 0);
        assert_eq!(single, [0]);

        assert_eq!(element.copy_to(&mut []), 0);
    }

    #[test]
    fn element_owns_its_text() {
        let mut source = String::from("owl");
        let element = Element::try_new(&source).unwrap();
        source.push('s');
        assert_eq!(element.value(), "owl");
        assert_eq!(element.into_string(), "owl");
    }
}
