/// Payload attached to an outgoing post. At most one per post; an image
/// takes priority over a link-preview card when both are available.
#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    None,
    Image { bytes: Vec<u8>, alt: String },
    External {
        uri: String,
        title: String,
        description: String,
    },
}

impl Attachment {
    pub fn kind(&self) -> &'static str {
        match self {
            Attachment::None => "none",
            Attachment::Image { .. } => "image",
            Attachment::External { .. } => "external",
        }
    }
}

/// A composed post, ready to hand to a [`Publisher`](crate::publisher::Publisher).
#[derive(Debug, Clone)]
pub struct Post {
    pub text: String,
    pub attachment: Attachment,
}

impl Post {
    pub fn new(text: String, attachment: Attachment) -> Self {
        Self { text, attachment }
    }
}
