use lantern_crawl_core::{Direction, Event, Intent, LayerKind, LightTint, Position, TurnPhase};
use lantern_crawl_system_bootstrap::{Bootstrap, GameConfig};
use lantern_crawl_system_combat_log::CombatLog;
use lantern_crawl_system_turns::TurnResolver;
use lantern_crawl_world::{query, World};

struct Session {
    world: World,
    resolver: TurnResolver,
    phase: TurnPhase,
    log: CombatLog,
}

impl Session {
    fn load(map: &str) -> Self {
        Self::load_with(map, GameConfig::default())
    }

    fn load_with(map: &str, config: GameConfig) -> Self {
        let mut world = Bootstrap::new(config).build_world(map).expect("map loads");
        let mut resolver = TurnResolver::default();
        let mut events = Vec::new();
        let phase = resolver.begin(&mut world, &mut events).expect("initial lighting");
        Self {
            world,
            resolver,
            phase,
            log: CombatLog::new(),
        }
    }

    fn submit(&mut self, intent: Intent) -> Vec<Event> {
        let mut events = Vec::new();
        self.phase = self
            .resolver
            .submit(&mut self.world, self.phase, intent, &mut events)
            .expect("turn resolves");
        self.log.handle(&events);
        events
    }

    fn step(&mut self, direction: Direction) -> Vec<Event> {
        self.submit(Intent::Move(direction))
    }

    fn logged(&self, line: &str) -> bool {
        self.log.lines().any(|logged| logged == line)
    }
}

fn phases(events: &[Event]) -> Vec<TurnPhase> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::PhaseChanged { phase } => Some(*phase),
            _ => None,
        })
        .collect()
}

#[test]
fn wall_bump_costs_the_turn() {
    let mut session = Session::load("p#\n");

    let events = session.step(Direction::East);

    assert_eq!(query::hero_position(&session.world), Some(Position::new(0, 0)));
    assert!(session.logged("You cannot move there."));
    assert_eq!(
        phases(&events),
        vec![
            TurnPhase::ResolvingPlayerAction,
            TurnPhase::ResolvingNpcPhase,
            TurnPhase::AwaitingPlayerInput,
        ]
    );
    assert_eq!(session.phase, TurnPhase::AwaitingPlayerInput);
}

#[test]
fn melee_exchange_kills_the_monster_on_the_second_blow() {
    let mut session = Session::load("pe \n");
    let monster = query::npcs(&session.world)[0].id;

    let _ = session.step(Direction::East);
    let npc = query::actor(&session.world, monster).expect("monster survives");
    assert_eq!(npc.hitpoints(), 2);
    assert_eq!(npc.position(), Position::new(1, 0));
    assert_eq!(query::hero_position(&session.world), Some(Position::new(0, 0)));
    assert_eq!(query::hero(&session.world).map(|hero| hero.hitpoints), Some(23));
    assert!(session.logged("You attacked Monster for 3 damage."));
    assert!(session.logged("Monster attacked you for 2 damage."));

    let _ = session.step(Direction::East);
    assert!(query::actor(&session.world, monster).is_none());
    assert!(query::layer(&session.world, LayerKind::Life)
        .actor_at(Position::new(1, 0))
        .is_none());
    assert!(query::layer(&session.world, LayerKind::Collision)
        .actor_at(Position::new(1, 0))
        .is_none());
    assert!(session.logged("You killed Monster!"));

    let _ = session.step(Direction::East);
    assert_eq!(query::hero_position(&session.world), Some(Position::new(1, 0)));
}

#[test]
fn gold_is_collected_when_stepping_onto_it() {
    let mut session = Session::load("pg\n");
    let floor = query::layer(&session.world, LayerKind::Floor).actor_at(Position::new(1, 0));

    let _ = session.step(Direction::East);

    let hero = query::hero(&session.world).expect("hero alive");
    assert_eq!(hero.position, Position::new(1, 0));
    assert_eq!(hero.gold, 5);
    assert!(query::layer(&session.world, LayerKind::Item).is_empty());
    assert_eq!(
        query::layer(&session.world, LayerKind::Floor).actor_at(Position::new(1, 0)),
        floor
    );
    assert!(session.logged("You picked up 5 gold!"));
}

#[test]
fn door_opens_then_lets_the_hero_through() {
    let mut session = Session::load("pd \n");

    let _ = session.step(Direction::East);
    assert_eq!(query::hero_position(&session.world), Some(Position::new(0, 0)));
    assert!(query::layer(&session.world, LayerKind::Block).is_empty());
    assert!(session.logged("You opened the door."));

    let _ = session.step(Direction::East);
    assert_eq!(query::hero_position(&session.world), Some(Position::new(1, 0)));
}

#[test]
fn chest_contents_land_in_the_inventory() {
    let mut config = GameConfig::default();
    config.chest.item = "Silver Key".to_owned();
    let mut session = Session::load_with("p\nc\n", config);

    let _ = session.step(Direction::South);
    let _ = session.step(Direction::South);

    let hero = query::hero(&session.world).expect("hero alive");
    assert_eq!(hero.items, vec!["Silver Key".to_owned()]);
    assert_eq!(hero.position, Position::new(0, 0));
    assert_eq!(
        session
            .log
            .lines()
            .filter(|line| line.starts_with("You opened a chest"))
            .count(),
        1
    );
}

#[test]
fn monsters_close_in_one_step_per_turn_in_row_major_order() {
    let mut session = Session::load("p ee\n");

    let _ = session.submit(Intent::Wait);

    let positions: Vec<_> = query::npcs(&session.world)
        .iter()
        .map(|npc| npc.position)
        .collect();
    assert_eq!(positions, vec![Position::new(1, 0), Position::new(2, 0)]);
    assert!(session.logged("You waited."));
}

#[test]
fn defeat_halts_the_npc_phase_and_the_turn_loop() {
    let mut config = GameConfig::default();
    config.hero.hitpoints = 2;
    let mut session = Session::load_with("epe\n", config);

    let events = session.submit(Intent::Wait);

    let strikes = events
        .iter()
        .filter(|event| matches!(event, Event::NpcAttacked { .. }))
        .count();
    assert_eq!(strikes, 1);
    assert!(matches!(
        events.iter().rev().nth(1),
        Some(Event::HeroDefeated { .. })
    ));
    assert_eq!(session.phase, TurnPhase::Defeated);
    assert!(session.logged("Monster killed you!"));
    assert_eq!(query::hero_id(&session.world), None);

    let after = session.submit(Intent::Move(Direction::East));
    assert!(after.is_empty());
    assert_eq!(session.phase, TurnPhase::Defeated);
}

#[test]
fn initial_lighting_reveals_the_hero_surroundings() {
    let session = Session::load(lantern_crawl_system_bootstrap::DEFAULT_MAP);
    let view = query::actor_view(&session.world);
    let hero = query::hero_id(&session.world).expect("hero placed");

    assert_eq!(session.phase, TurnPhase::AwaitingPlayerInput);
    assert_eq!(view.get(hero).map(|snapshot| snapshot.tint), Some(LightTint::Visible1));
    assert!(view
        .iter()
        .any(|snapshot| snapshot.position == Position::new(0, 2) && snapshot.revealed));
    assert!(view
        .iter()
        .filter(|snapshot| snapshot.position.x() > 40)
        .all(|snapshot| !snapshot.revealed));
}
