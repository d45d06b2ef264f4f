use serde::{Deserialize, Serialize};

/// Byte order of a scalar field class.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ByteOrder {
    /// Least-significant byte first.
    #[default]
    LittleEndian,
    /// Most-significant byte first.
    BigEndian,
}

/// Preferred display base for an [`Integer`] or [`Enumeration`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegerBase {
    Binary,
    Octal,
    #[default]
    Decimal,
    Hexadecimal,
}

/// Text encoding carried by an [`Integer`] used as a byte of an encoded string.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    #[default]
    None,
    Utf8,
    Ascii,
}

/// An integer field class: size, alignment, signedness, display base, byte
/// order, and an optional text-encoding tag.
///
/// This is also the shape a [`Sequence`] length and a [`Variant`] tag's
/// resolved back-reference is recorded as once resolution confirms the
/// target is type-compatible (unsigned, for a length).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Integer {
    pub size_bits: u16,
    pub alignment_bits: u16,
    pub is_signed: bool,
    #[serde(default)]
    pub base: IntegerBase,
    #[serde(default)]
    pub byte_order: ByteOrder,
    #[serde(default)]
    pub encoding: TextEncoding,
}

impl Integer {
    /// A plain unsigned integer of the given bit width, naturally aligned.
    pub fn unsigned(size_bits: u16) -> Self {
        Self {
            size_bits,
            alignment_bits: size_bits,
            is_signed: false,
            base: IntegerBase::Decimal,
            byte_order: ByteOrder::LittleEndian,
            encoding: TextEncoding::None,
        }
    }

    /// A plain signed integer of the given bit width, naturally aligned.
    pub fn signed(size_bits: u16) -> Self {
        Self {
            is_signed: true,
            ..Self::unsigned(size_bits)
        }
    }
}

/// One labeled range of an [`Enumeration`]'s underlying integer value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnumerationRange {
    pub label: String,
    pub start: i64,
    pub end: i64,
}

/// An enumeration field class: an underlying [`Integer`] plus labeled ranges.
///
/// This is the shape a [`Variant`] tag's resolved back-reference is recorded
/// as once resolution confirms the target is an enumeration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enumeration {
    pub base: Integer,
    pub ranges: Vec<EnumerationRange>,
}

/// A floating-point field class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloatingPoint {
    pub size_bits: u16,
    pub alignment_bits: u16,
    #[serde(default)]
    pub byte_order: ByteOrder,
}

/// A NUL-terminated string field class (leaf; no length/tag reference).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StringClass {
    #[serde(default)]
    pub encoding: TextEncoding,
}

/// An ordered sequence of named members.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub members: Vec<(String, FieldClass)>,
}

impl Structure {
    pub fn new(members: Vec<(String, FieldClass)>) -> Self {
        Self { members }
    }

    /// Position of `name` among this structure's members, if present.
    pub fn member_index(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|(n, _)| n == name)
    }
}

/// An ordered sequence of named options, plus the textual tag reference and
/// (once resolved) the tag's field path and field class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub options: Vec<(String, FieldClass)>,
    pub tag_ref: String,
    #[serde(default)]
    pub tag_path: Option<crate::FieldPath>,
    #[serde(default)]
    pub tag_field_class: Option<Enumeration>,
}

impl Variant {
    pub fn new(options: Vec<(String, FieldClass)>, tag_ref: impl Into<String>) -> Self {
        Self {
            options,
            tag_ref: tag_ref.into(),
            tag_path: None,
            tag_field_class: None,
        }
    }

    /// Position of `name` among this variant's options, if present.
    pub fn option_index(&self, name: &str) -> Option<usize> {
        self.options.iter().position(|(n, _)| n == name)
    }

    /// True once the resolver has populated `tag_path`/`tag_field_class`.
    pub fn is_resolved(&self) -> bool {
        self.tag_path.is_some()
    }
}

/// A fixed-length array of one element field class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypedArray {
    pub element: Box<FieldClass>,
    pub length: u64,
}

impl TypedArray {
    pub fn new(element: FieldClass, length: u64) -> Self {
        Self {
            element: Box::new(element),
            length,
        }
    }
}

/// A variable-length sequence: one element field class, plus the textual
/// length reference and (once resolved) the length's field path and field
/// class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    pub element: Box<FieldClass>,
    pub length_ref: String,
    #[serde(default)]
    pub length_path: Option<crate::FieldPath>,
    #[serde(default)]
    pub length_field_class: Option<Integer>,
}

impl Sequence {
    pub fn new(element: FieldClass, length_ref: impl Into<String>) -> Self {
        Self {
            element: Box::new(element),
            length_ref: length_ref.into(),
            length_path: None,
            length_field_class: None,
        }
    }

    /// True once the resolver has populated `length_path`/`length_field_class`.
    pub fn is_resolved(&self) -> bool {
        self.length_path.is_some()
    }
}

/// A field class: a tagged union over the eight CTF field-class kinds.
///
/// Re-implemented here as a plain Rust sum type rather than the
/// discriminator-plus-downcast representation CTF implementations typically
/// use in C; matching on `FieldClass` replaces the downcast.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "kebab-case")]
pub enum FieldClass {
    Integer(Integer),
    Enumeration(Enumeration),
    FloatingPoint(FloatingPoint),
    String(StringClass),
    Structure(Structure),
    Variant(Variant),
    Array(TypedArray),
    Sequence(Sequence),
}

impl FieldClass {
    /// Structure and variant parents index children by member/option
    /// position; array and sequence parents have exactly one child class,
    /// addressed by the sentinel index.
    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            FieldClass::Structure(_)
                | FieldClass::Variant(_)
                | FieldClass::Array(_)
                | FieldClass::Sequence(_)
        )
    }

    /// Looks up a member/option's position by name. `None` for non-compound
    /// and for array/sequence classes (which are not named-child compounds).
    pub fn named_child_index(&self, name: &str) -> Option<usize> {
        match self {
            FieldClass::Structure(s) => s.member_index(name),
            FieldClass::Variant(v) => v.option_index(name),
            _ => None,
        }
    }

    /// The child class at a structure/variant member position.
    pub fn named_child(&self, index: usize) -> Option<&FieldClass> {
        match self {
            FieldClass::Structure(s) => s.members.get(index).map(|(_, fc)| fc),
            FieldClass::Variant(v) => v.options.get(index).map(|(_, fc)| fc),
            _ => None,
        }
    }

    /// The single element class of an array or sequence.
    pub fn element(&self) -> Option<&FieldClass> {
        match self {
            FieldClass::Array(a) => Some(&a.element),
            FieldClass::Sequence(s) => Some(&s.element),
            _ => None,
        }
    }

    /// The single element class of an array or sequence, mutably.
    pub fn element_mut(&mut self) -> Option<&mut FieldClass> {
        match self {
            FieldClass::Array(a) => Some(&mut a.element),
            FieldClass::Sequence(s) => Some(&mut s.element),
            _ => None,
        }
    }

    /// True for an [`Integer`] with `is_signed = false`.
    pub fn is_unsigned_integer(&self) -> bool {
        matches!(self, FieldClass::Integer(i) if !i.is_signed)
    }

    /// True for an [`Enumeration`].
    pub fn is_enumeration(&self) -> bool {
        matches!(self, FieldClass::Enumeration(_))
    }
}
