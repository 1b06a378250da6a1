use std::fmt;

/// Well-known tag keys. Anything else is kept under its raw key only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardTagKey {
    Album,
    AlbumArtist,
    Artist,
    Date,
    DiscNumber,
    Genre,
    TrackNumber,
    TrackTitle,
}

/// Value held by a [Tag].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    UnsignedInt(u64),
    SignedInt(i64),
    Float(f64),
    Boolean(bool),
    Binary(Box<[u8]>),
    Flag,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::UnsignedInt(n) => write!(f, "{}", n),
            Value::SignedInt(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Binary(bytes) => write!(f, "<{} bytes>", bytes.len()),
            Value::Flag => write!(f, "<flag>"),
        }
    }
}

/// A single decoded key/value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub std_key: Option<StandardTagKey>,
    pub key: String,
    pub value: Value,
}

impl Tag {
    pub fn new(std_key: Option<StandardTagKey>, key: impl Into<String>, value: Value) -> Self {
        Tag {
            std_key,
            key: key.into(),
            value,
        }
    }
}

/// How an attached picture is meant to be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardVisualKey {
    FrontCover,
    BackCover,
    Leaflet,
    Media,
    ArtistPhoto,
    Other,
}

/// Pixel dimensions of a [Visual].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// An embedded binary attachment, usually cover art.
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub media_type: String,
    pub dimensions: Option<Size>,
    pub usage: Option<StandardVisualKey>,
    pub tags: Vec<Tag>,
    pub data: Box<[u8]>,
}

/// Opaque container-specific data kept alongside the tags.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorData {
    pub ident: String,
    pub data: Box<[u8]>,
}

/// Owned contents of a [MetadataRevision], returned by [MetadataRevision::into_parts].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RevisionParts {
    pub tags: Vec<Tag>,
    pub visuals: Vec<Visual>,
    pub vendor_data: Vec<VendorData>,
}

/// One snapshot of decoded metadata. Later revisions supersede earlier ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetadataRevision {
    tags: Vec<Tag>,
    visuals: Vec<Visual>,
    vendor_data: Vec<VendorData>,
}

impl MetadataRevision {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_visual(mut self, visual: Visual) -> Self {
        self.visuals.push(visual);
        self
    }

    pub fn with_vendor_data(mut self, vendor_data: VendorData) -> Self {
        self.vendor_data.push(vendor_data);
        self
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn visuals(&self) -> &[Visual] {
        &self.visuals
    }

    pub fn vendor_data(&self) -> &[VendorData] {
        &self.vendor_data
    }

    /// First tag with the given standard key.
    pub fn get(&self, key: StandardTagKey) -> Option<&Tag> {
        self.tags.iter().find(|t| t.std_key == Some(key))
    }

    /// First visual marked as the front cover, if any.
    pub fn front_cover(&self) -> Option<&Visual> {
        self.visuals
            .iter()
            .find(|v| v.usage == Some(StandardVisualKey::FrontCover))
    }

    /// Moves the attachments out, leaving this revision without them.
    pub fn take_visuals(&mut self) -> Vec<Visual> {
        std::mem::take(&mut self.visuals)
    }

    /// Consumes the revision and hands back its contents without copying them.
    pub fn into_parts(self) -> RevisionParts {
        RevisionParts {
            tags: self.tags,
            visuals: self.visuals,
            vendor_data: self.vendor_data,
        }
    }
}
