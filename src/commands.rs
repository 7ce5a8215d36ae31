/// What a key-press asks the session to do. The meaning of `Escape` and
/// `Confirm` depends on the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Load,
    Rotate,
    SelectRoi,
    Quit,
    Escape,
    Confirm,
    Cancel,
}
