use crate::utils::LocalStore;
use leaderboard_viewer::prefs::Preferences;
use leaderboard_viewer::{App, Command, Dataset, LoadError};
use std::rc::Rc;
use yew::prelude::*;

/// Messages accepted by the leaderboard reducer.
pub enum LeaderboardAction {
    /// Result of the startup fetch and parse.
    Loaded(Result<Dataset, LoadError>),
    Command(Command),
    DismissNotice,
}

/// Reducer state: the application plus the current transient notice.
#[derive(Clone)]
pub struct LeaderboardModel {
    pub app: App,
    /// Message from the last rejected command, cleared on the next success.
    pub notice: Option<String>,
}

impl Reducible for LeaderboardModel {
    type Action = LeaderboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            LeaderboardAction::Loaded(result) => next.app.load(result),
            LeaderboardAction::Command(command) => {
                next.notice = next.app.dispatch(command).err().map(|e| e.to_string());
            }
            LeaderboardAction::DismissNotice => next.notice = None,
        }
        Rc::new(next)
    }
}

/// Leaderboard state seeded from the saved preferences.
#[hook]
pub fn use_leaderboard() -> UseReducerHandle<LeaderboardModel> {
    use_reducer(|| LeaderboardModel {
        app: App::new(Preferences::load(&LocalStore::open())),
        notice: None,
    })
}

/// Callback that turns its argument into a command and dispatches it.
pub fn command_callback<T, F>(dispatcher: &UseReducerDispatcher<LeaderboardModel>, build: F) -> Callback<T>
where
    T: 'static,
    F: Fn(T) -> Command + 'static,
{
    let dispatcher = dispatcher.clone();
    Callback::from(move |value: T| {
        dispatcher.dispatch(LeaderboardAction::Command(build(value)));
    })
}
