use crate::board::Board;
use crate::leaderboard::{LeaderboardView, LocalStorageStore, RecordForm};
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Interval;
use minesweep_core as game;
use game::{LeaderboardStore, Outcome, SessionState, Signal};
use yew::prelude::*;

const TICK_MILLIS: u32 = 1000;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellMsg {
    Select(game::Coord2),
    Flag(game::Coord2),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    /// One second passed on the clock of the given epoch.
    Tick(u32),
    NewGame,
    SubmitRecord(String),
}

fn cell_class(view: game::CellView) -> Classes {
    use game::CellView::*;

    classes!(
        "cell",
        match view {
            Hidden => classes!(),
            Blank => classes!("open", "num-0"),
            Number(count) => classes!("open", format!("num-{}", count)),
            Mine => classes!("open", "mine"),
            Flag => classes!("flag"),
        }
    )
}

fn cell_text(view: game::CellView) -> String {
    use game::CellView::*;

    match view {
        Hidden | Blank => String::new(),
        Number(count) => count.to_string(),
        Mine => "💣".to_string(),
        Flag => "🚩".to_string(),
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: game::Coord,
    col: game::Coord,
    view: game::CellView,
    callback: Callback<CellMsg>,
}

#[function_component(CellTile)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        row,
        col,
        view,
        callback,
    } = props.clone();
    let class = cell_class(view);

    let onclick = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            log::trace!("({}, {}) click", row, col);
            callback.emit(CellMsg::Select((row, col)));
        })
    };

    let oncontextmenu = {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            log::trace!("({}, {}) context menu", row, col);
            callback.emit(CellMsg::Flag((row, col)));
        })
    };

    html! {
        <td {class} {onclick} {oncontextmenu}>{cell_text(view)}</td>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed for the first game instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: game::Session,
    board: Board,
    store: LocalStorageStore,
    leaderboard: Vec<game::LeaderboardEntry>,
    record_form_open: bool,
    timer: Option<Interval>,
}

impl GameView {
    fn start_timer(&mut self, ctx: &Context<Self>) {
        let epoch = self.session.epoch();
        let link = ctx.link().clone();
        self.timer = Some(Interval::new(TICK_MILLIS, move || {
            link.send_message(Msg::Tick(epoch))
        }));
    }

    /// Dropping the interval cancels it.
    fn stop_timer(&mut self) {
        if self.timer.take().is_some() {
            log::debug!("timer stopped at {}s", self.session.elapsed_secs());
        }
    }

    fn refresh_leaderboard(&mut self) {
        match self.store.top(game::TOP_ENTRIES) {
            Ok(entries) => self.leaderboard = entries,
            Err(err) => log::error!("Could not load leaderboard: {:?}", err),
        }
    }

    fn apply(&mut self, ctx: &Context<Self>, render: game::Result<game::Render>) -> bool {
        let render = match render {
            Ok(render) => render,
            Err(err) => {
                log::warn!("input rejected: {}", err);
                return false;
            }
        };

        let redraw = self.board.apply(&render);
        for &signal in &render.signals {
            log::debug!("signal: {:?}", signal);
            match signal {
                Signal::Started => self.start_timer(ctx),
                Signal::Won | Signal::Lost => self.stop_timer(),
                Signal::RecordRequested { .. } => self.record_form_open = true,
                Signal::Reset => self.record_form_open = false,
                Signal::Timer(_) => {}
            }
        }

        redraw || !render.signals.is_empty()
    }

    fn game_state_class(&self) -> &'static str {
        match (self.session.state(), self.session.outcome()) {
            (SessionState::NotStarted, _) => "not-started",
            (SessionState::Running, _) => "in-progress",
            (SessionState::Over, Outcome::Won) => "win",
            (SessionState::Over, _) => "lose",
        }
    }

    fn banner(&self) -> Html {
        match self.session.outcome() {
            Outcome::None => html! {},
            Outcome::Won => html! {
                <p id="congratulations">
                    {"Congratulations! You've successfully cleared the minefield!"}
                </p>
            },
            Outcome::Lost => html! {
                <p id="game-over">{"Game Over! You clicked a bomb."}</p>
            },
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        let session = game::Session::new(
            game::GameConfig::DEFAULT,
            game::RandomLayoutGenerator::new(seed),
        )
        .expect("standard board always has safe cells");
        let board = Board::new(session.grid().size());

        let mut view = Self {
            session,
            board,
            store: LocalStorageStore,
            leaderboard: Vec::new(),
            record_form_open: false,
            timer: None,
        };
        view.refresh_leaderboard();
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use CellMsg::*;
        use Msg::*;

        match msg {
            CellEvent(Select(pos)) => {
                log::debug!("select cell: {:?}", pos);
                let render = self.session.select_cell(pos);
                self.apply(ctx, render)
            }
            CellEvent(Flag(pos)) => {
                log::debug!("flag cell: {:?}", pos);
                let render = self.session.flag_cell(pos);
                self.apply(ctx, render)
            }
            Tick(epoch) => self.session.tick(epoch).is_some(),
            NewGame => {
                // cancel before the old epoch is replaced
                self.stop_timer();
                let seed = js_random_seed();
                log::debug!("seed: {}", seed);
                let render = self.session.reset(game::RandomLayoutGenerator::new(seed));
                self.apply(ctx, render)
            }
            SubmitRecord(name) => {
                if let Some(entry) = self.session.record_entry(name) {
                    if let Err(err) = self.store.append_entry(entry) {
                        log::error!("Could not save leaderboard entry: {:?}", err);
                    }
                    self.refresh_leaderboard();
                }
                self.record_form_open = false;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let (rows, cols) = self.board.size();
        let game_state_class = classes!(self.game_state_class());
        let is_playable = !self.session.is_over();
        let mines_left = format_for_counter(self.session.mines_left());
        let elapsed_time = format_for_counter(self.session.elapsed_secs() as i32);

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let cb_submit = ctx.link().callback(SubmitRecord);

        html! {
            <div class="minesweep" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <nav>
                    <aside id="flags">{mines_left}</aside>
                    <span><button id="reset-button" class={game_state_class} onclick={cb_new_game}/></span>
                    <aside id="timer">{elapsed_time}</aside>
                </nav>
                <table id="game-container" class={is_playable.then_some("playable")}>
                    {
                        for (0..rows).map(|row| html! {
                            <tr>
                                {
                                    for (0..cols).map(|col| {
                                        let view = self.board.view_at((row, col));
                                        let callback = ctx.link().callback(Msg::CellEvent);
                                        html! {
                                            <CellTile {row} {col} {view} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                {self.banner()}
                <RecordForm open={self.record_form_open} on_submit={cb_submit}/>
                <LeaderboardView entries={self.leaderboard.clone()}/>
            </div>
        }
    }
}
