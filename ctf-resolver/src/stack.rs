use ctf_metadata::FieldClass;

/// One frame of the descent path stack (§4.3): the compound field class the
/// resolver descended into, and the index of the child currently being
/// visited within it.
///
/// Grounded on the same push/pop/current shape used by thread-local span
/// stacks elsewhere in the tracing ecosystem, generalized here to also
/// support indexed lookup (`at`) since the relative-path search (§4.6) needs
/// to address an arbitrary ancestor, not just the top.
pub struct Frame<'a> {
    pub field_class: &'a FieldClass,
    pub index: i32,
}

/// A growable ordered sequence of frames reflecting the path from the
/// current root scope down to (but not including) the field currently being
/// resolved.
pub struct DescentStack<'a> {
    frames: Vec<Frame<'a>>,
}

impl<'a> DescentStack<'a> {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn push(&mut self, field_class: &'a FieldClass, index: i32) {
        self.frames.push(Frame { field_class, index });
    }

    pub fn pop(&mut self) -> Option<Frame<'a>> {
        self.frames.pop()
    }

    pub fn size(&self) -> usize {
        self.frames.len()
    }

    pub fn peek(&self) -> Option<&Frame<'a>> {
        self.frames.last()
    }

    pub fn at(&self, i: usize) -> Option<&Frame<'a>> {
        self.frames.get(i)
    }

    pub fn set_top_index(&mut self, index: i32) {
        if let Some(top) = self.frames.last_mut() {
            top.index = index;
        }
    }

    /// The indices of every frame, outermost first: this is exactly the
    /// field path from the current root scope to the field about to be
    /// visited.
    pub fn indices(&self) -> Vec<i32> {
        self.frames.iter().map(|frame| frame.index).collect()
    }
}

impl Default for DescentStack<'_> {
    fn default() -> Self {
        Self::new()
    }
}
