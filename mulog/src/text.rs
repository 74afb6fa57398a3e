use std::borrow::Cow;

/// Text accepted by [`SeverityLogger`](crate::SeverityLogger).
///
/// UTF-16 input is decoded lossily, invalid surrogates become `U+FFFD`.
pub trait IssueText {
    fn to_text(&self) -> Cow<'_, str>;
}

impl IssueText for str {
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl IssueText for String {
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl IssueText for Cow<'_, str> {
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl IssueText for [u16] {
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Owned(String::from_utf16_lossy(self))
    }
}

impl IssueText for Vec<u16> {
    fn to_text(&self) -> Cow<'_, str> {
        self.as_slice().to_text()
    }
}

impl<T: IssueText + ?Sized> IssueText for &T {
    fn to_text(&self) -> Cow<'_, str> {
        (**self).to_text()
    }
}

#[test]
fn test_text_conversions() {
    assert_eq!("plain".to_text(), "plain");
    assert_eq!(String::from("owned").to_text(), "owned");
    assert_eq!(Cow::Borrowed("cow").to_text(), "cow");
    let wide: Vec<u16> = "héllo wörld".encode_utf16().collect();
    assert_eq!(wide.to_text(), "héllo wörld");
    assert_eq!(wide.as_slice().to_text(), "héllo wörld");
    let broken = [0x0068, 0xD800, 0x0069];
    assert_eq!(broken[..].to_text(), "h\u{FFFD}i");
}
