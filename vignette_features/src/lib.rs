/// Structure containing the dialect flags of the language.
///
/// The scenario language grew a few lenient corners before its grammar was pinned down.
/// Each flag selects between the historical behavior and the stricter one.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Features {
    /// Whether tokens other than `author`, `branch` and `}` directly inside a scene are
    /// skipped with a warning. When off they are syntax errors.
    pub lenient_scene_items: bool,

    /// Whether the `{` opening an `author` or `branch` body may be omitted.
    pub optional_body_brace: bool,

    /// Whether `{` and `}` nest inside an `author` or `branch` body. When off the body ends
    /// at the first `}`.
    pub balanced_body_braces: bool,

    /// Whether runs of spaces and tabs after a newline or a space inside a string
    /// literal are collapsed.
    pub collapse_string_whitespace: bool,
}

impl Features {
    /// Returns the default feature set. Same as `Default::default`.
    ///
    /// Body braces are required, stray scene items only warn.
    pub fn new() -> Self {
        Features {
            lenient_scene_items: true,
            optional_body_brace: false,
            balanced_body_braces: true,
            collapse_string_whitespace: true,
        }
    }

    /// Returns a feature set that accepts everything the historical grammar accepted.
    pub fn compatible() -> Self {
        Features {
            lenient_scene_items: true,
            optional_body_brace: true,
            balanced_body_braces: false,
            collapse_string_whitespace: true,
        }
    }

    /// Returns a feature set with every leniency turned into an error.
    pub fn strict() -> Self {
        Features {
            lenient_scene_items: false,
            optional_body_brace: false,
            balanced_body_braces: true,
            collapse_string_whitespace: true,
        }
    }
}

impl Default for Features {
    fn default() -> Self {
        Features::new()
    }
}
