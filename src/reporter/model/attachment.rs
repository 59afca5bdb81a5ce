use derivative::*;
use mime::Mime;

#[derive(Clone, PartialEq, Derivative)]
#[derivative(Debug)]
pub struct Attachment {
    pub name: String,
    #[derivative(Debug = "ignore")]
    pub data: Vec<u8>,
    pub mime: Mime,
}

impl Attachment {
    /// Builds an attachment whose content type is guessed from the file name.
    pub fn guessed<S: Into<String>>(name: S, data: Vec<u8>) -> Self {
        let name = name.into();
        let mime = mime_guess::from_path(&name).first_or_octet_stream();
        Self { name, data, mime }
    }
}
