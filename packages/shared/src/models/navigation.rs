/// Screens an operation can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Dashboard,
}

/// What a screen asks its host to do after handling an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Redirect(Screen),
}
