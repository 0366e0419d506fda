pub mod net;

use crate::game::constants::BOT_COUNT;
use crate::game::sim;
use crate::game::spawn::{random_bot, reset_player_in_place};
use crate::game::types::{Bot, Food, Player, Vec2};
use crate::protocol::{ClientMessage, ServerMessage};
use std::collections::HashMap;

/// One session's bridge between the local simulation and the relay.
///
/// The local player is simulated here and shipped upstream each tick;
/// everything else (remote players, the food pool) is an eventually
/// consistent mirror built from broadcasts. Bots are purely local.
pub struct GameClient {
    player_id: Option<u32>,
    player: Option<Player>,
    remote_players: HashMap<u32, Player>,
    foods: Vec<Food>,
    bots: Vec<Bot>,
    game_over: bool,
}

impl GameClient {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            player_id: None,
            player: None,
            remote_players: HashMap::new(),
            foods: Vec::new(),
            bots: (0..BOT_COUNT).map(|_| random_bot(&mut rng)).collect(),
            game_over: false,
        }
    }

    /// Merges one inbound broadcast into the local mirrors.
    pub fn apply(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::Init {
                player_id,
                mut players,
                foods,
            } => {
                self.player_id = Some(player_id);
                self.player = players.remove(&player_id);
                self.remote_players = players;
                self.foods = foods;
                self.game_over = false;
            }
            ServerMessage::NewPlayer { player } | ServerMessage::UpdatePlayer { player } => {
                self.upsert_remote(player);
            }
            ServerMessage::ResetPlayer { player } => {
                if Some(player.id) == self.player_id {
                    // our own relay-side respawn; stay frozen until restart
                    self.player = Some(player);
                } else {
                    self.upsert_remote(player);
                }
            }
            ServerMessage::RemovePlayer { player_id } => {
                self.remote_players.remove(&player_id);
            }
            ServerMessage::UpdateFood { food } => {
                let id = food.id;
                if id < self.foods.len() {
                    self.foods[id] = food;
                }
            }
        }
    }

    /// Advances one frame of local simulation and returns the messages to
    /// ship upstream. While dead (or before `init`) this is a no-op.
    pub fn tick(&mut self, pointer: Vec2) -> Vec<ClientMessage> {
        let mut outbound = Vec::new();
        if self.game_over {
            return outbound;
        }
        let Some(player) = self.player.as_mut() else {
            return outbound;
        };
        let mut rng = rand::thread_rng();

        sim::advance_player(player, pointer);

        for bot in &mut self.bots {
            sim::wander_bot(bot, &mut rng);
            let bot_head = Vec2 { x: bot.x, y: bot.y };
            for _consumed in sim::consume_food(bot_head, bot.radius, &mut self.foods, &mut rng) {
                sim::grow_trail(&mut bot.segments, &mut bot.segment_count);
            }
        }

        let head = Vec2 {
            x: player.x,
            y: player.y,
        };
        for consumed in sim::consume_food(head, player.radius, &mut self.foods, &mut rng) {
            player.score += consumed.points;
            sim::grow_trail(&mut player.segments, &mut player.segment_count);
            // optimistic local replacement; the updateFood broadcast that
            // follows is idempotent and simply overwrites the slot again
            outbound.push(ClientMessage::EatFood {
                food_id: consumed.slot,
            });
        }

        let hit_remote = self.remote_players.values().any(|other| {
            sim::hits_trail(
                head,
                player.radius,
                Vec2 {
                    x: other.x,
                    y: other.y,
                },
                other.radius,
                &other.segments,
            )
        });
        let hit_bot = self.bots.iter().any(|bot| {
            sim::hits_trail(
                head,
                player.radius,
                Vec2 { x: bot.x, y: bot.y },
                bot.radius,
                &bot.segments,
            )
        });

        if hit_remote || hit_bot {
            self.game_over = true;
            outbound.push(ClientMessage::Dead);
            return outbound;
        }

        outbound.push(ClientMessage::Update {
            x: player.x,
            y: player.y,
            angle: player.angle,
            segments: player.segments.clone(),
            score: player.score,
        });
        outbound
    }

    /// Player-initiated restart after death: re-randomize in place and
    /// resume ticking. The next `update` resynchronizes the relay.
    pub fn restart(&mut self) {
        let Some(player) = self.player.as_mut() else { return };
        let mut rng = rand::thread_rng();
        reset_player_in_place(player, &mut rng);
        self.game_over = false;
    }

    fn upsert_remote(&mut self, player: Player) {
        if Some(player.id) == self.player_id {
            return;
        }
        self.remote_players.insert(player.id, player);
    }

    pub fn player_id(&self) -> Option<u32> {
        self.player_id
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn remote_players(&self) -> &HashMap<u32, Player> {
        &self.remote_players
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn bots(&self) -> &[Bot] {
        &self.bots
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}

impl Default for GameClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::constants::{FOOD_COUNT, STARTING_SEGMENT_COUNT};
    use crate::game::spawn::{default_trail, initial_food_pool, random_player};

    fn init_message(own_id: u32, extra: &[Player]) -> ServerMessage {
        let mut rng = rand::thread_rng();
        let mut players = HashMap::new();
        let mut own = random_player(own_id, &mut rng);
        own.x = 400.0;
        own.y = 300.0;
        own.segments = default_trail(Vec2 { x: 400.0, y: 300.0 }, own.segment_count);
        players.insert(own_id, own);
        for player in extra {
            players.insert(player.id, player.clone());
        }
        let mut foods = initial_food_pool(&mut rng);
        // keep food away from the spawn so ticks stay deterministic
        for food in &mut foods {
            food.x = 790.0;
            food.y = 10.0;
        }
        ServerMessage::Init {
            player_id: own_id,
            players,
            foods,
        }
    }

    fn quiet_client(own_id: u32, extra: &[Player]) -> GameClient {
        let mut client = GameClient::new();
        client.bots.clear();
        client.apply(init_message(own_id, extra));
        client
    }

    fn far_remote(id: u32) -> Player {
        let mut rng = rand::thread_rng();
        let mut player = random_player(id, &mut rng);
        player.x = 20.0;
        player.y = 580.0;
        player.segments = default_trail(Vec2 { x: 20.0, y: 580.0 }, player.segment_count);
        player
    }

    #[test]
    fn init_seeds_identity_mirrors_and_food() {
        let client = quiet_client(5, &[far_remote(2)]);
        assert_eq!(client.player_id(), Some(5));
        assert_eq!(client.player().unwrap().id, 5);
        assert_eq!(client.remote_players().len(), 1);
        assert_eq!(client.foods().len(), FOOD_COUNT);
        assert!(!client.is_game_over());
    }

    #[test]
    fn tick_before_init_produces_nothing() {
        let mut client = GameClient::new();
        assert!(client.tick(Vec2 { x: 100.0, y: 100.0 }).is_empty());
    }

    #[test]
    fn alive_tick_emits_a_full_state_update() {
        let mut client = quiet_client(1, &[]);
        let outbound = client.tick(Vec2 { x: 500.0, y: 300.0 });

        assert_eq!(outbound.len(), 1);
        match &outbound[0] {
            ClientMessage::Update { x, y, angle, segments, score } => {
                assert!((*x - 403.0).abs() < 1e-12);
                assert!((*y - 300.0).abs() < 1e-12);
                assert_eq!(*angle, 0.0);
                assert_eq!(segments.len(), STARTING_SEGMENT_COUNT);
                assert_eq!(*score, 0);
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn local_food_consumption_is_optimistic_and_scores_floor_radius() {
        let mut client = quiet_client(1, &[]);
        client.foods[7] = Food {
            id: 7,
            x: 404.0,
            y: 300.0,
            radius: 6.9,
            color: "#ffff00".to_string(),
        };

        let outbound = client.tick(Vec2 { x: 500.0, y: 300.0 });

        assert!(outbound
            .iter()
            .any(|message| matches!(message, ClientMessage::EatFood { food_id: 7 })));
        let player = client.player().unwrap();
        assert_eq!(player.score, 6);
        assert_eq!(player.segment_count, STARTING_SEGMENT_COUNT + 1);
        assert_eq!(player.segments.len(), player.segment_count);
        // slot already replaced locally, same identity
        assert_eq!(client.foods[7].id, 7);
        assert!(client.foods[7].x != 404.0 || client.foods[7].y != 300.0);
    }

    #[test]
    fn colliding_with_a_remote_trail_emits_dead_and_freezes() {
        let mut remote = far_remote(2);
        remote.segments[3] = Vec2 { x: 403.0, y: 300.0 };
        let mut client = quiet_client(1, &[remote]);

        let outbound = client.tick(Vec2 { x: 500.0, y: 300.0 });

        assert!(client.is_game_over());
        assert!(matches!(outbound.last(), Some(ClientMessage::Dead)));
        assert!(!outbound
            .iter()
            .any(|message| matches!(message, ClientMessage::Update { .. })));

        // frozen until restart
        assert!(client.tick(Vec2 { x: 500.0, y: 300.0 }).is_empty());
    }

    #[test]
    fn restart_resets_locally_and_resumes_ticking() {
        let mut remote = far_remote(2);
        remote.segments[3] = Vec2 { x: 403.0, y: 300.0 };
        let mut client = quiet_client(1, &[remote]);
        client.tick(Vec2 { x: 500.0, y: 300.0 });
        assert!(client.is_game_over());

        client.apply(ServerMessage::RemovePlayer { player_id: 2 });
        client.restart();

        assert!(!client.is_game_over());
        let player = client.player().unwrap();
        assert_eq!(player.score, 0);
        assert_eq!(player.segment_count, STARTING_SEGMENT_COUNT);

        let outbound = client.tick(Vec2 { x: 0.0, y: 0.0 });
        assert!(matches!(outbound.last(), Some(ClientMessage::Update { .. })));
    }

    #[test]
    fn broadcast_merges_upsert_delete_and_overwrite() {
        let mut client = quiet_client(1, &[]);

        client.apply(ServerMessage::NewPlayer { player: far_remote(2) });
        assert!(client.remote_players().contains_key(&2));

        let mut moved = far_remote(2);
        moved.x = 111.0;
        client.apply(ServerMessage::UpdatePlayer { player: moved });
        assert_eq!(client.remote_players()[&2].x, 111.0);

        let reset = far_remote(2);
        client.apply(ServerMessage::ResetPlayer { player: reset });
        assert_eq!(client.remote_players()[&2].x, 20.0);

        client.apply(ServerMessage::RemovePlayer { player_id: 2 });
        assert!(!client.remote_players().contains_key(&2));

        let replacement = Food {
            id: 9,
            x: 50.0,
            y: 60.0,
            radius: 5.5,
            color: "#00ffff".to_string(),
        };
        client.apply(ServerMessage::UpdateFood { food: replacement });
        assert_eq!(client.foods()[9].x, 50.0);
    }

    #[test]
    fn own_reset_player_is_adopted_but_stays_frozen() {
        let mut remote = far_remote(2);
        remote.segments[3] = Vec2 { x: 403.0, y: 300.0 };
        let mut client = quiet_client(1, &[remote]);
        client.tick(Vec2 { x: 500.0, y: 300.0 });
        assert!(client.is_game_over());

        let mut rng = rand::thread_rng();
        let respawned = random_player(1, &mut rng);
        client.apply(ServerMessage::ResetPlayer { player: respawned });

        assert!(client.is_game_over());
        assert_eq!(client.player().unwrap().score, 0);
        assert!(!client.remote_players().contains_key(&1));
    }

    #[test]
    fn stale_food_slot_from_broadcast_is_ignored() {
        let mut client = quiet_client(1, &[]);
        client.apply(ServerMessage::UpdateFood {
            food: Food {
                id: FOOD_COUNT + 10,
                x: 1.0,
                y: 1.0,
                radius: 5.0,
                color: "#0000ff".to_string(),
            },
        });
        assert_eq!(client.foods().len(), FOOD_COUNT);
    }
}
