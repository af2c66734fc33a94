//! Query commands exposed to the host.
//!
//! Two read-only queries: the history of a specific character and a dump of
//! everything cached. Both read the cache directly -- they never touch the
//! observation queue or the resolver. The remaining commands feed sightings
//! into the queue on behalf of the console stand-in.

use parking_lot::RwLock;
use retrace_cache::AliasCache;
use retrace_types::capitalize_name_part;

use crate::sightings::SightingSink;

/// Usage text for the console stand-in.
const USAGE: &str = "commands:\n\
    \x20 seen <first> <last> <world>       queue a chat sighting\n\
    \x20 roster (<first> <last> <world>)+  queue a visible-player snapshot\n\
    \x20 login <first> <last> <world>      check in the local player\n\
    \x20 logout                            local player gone\n\
    \x20 whowas <first> <last> <world>     show a character's alias history\n\
    \x20 cached                            list every cached identity\n\
    \x20 quit                              exit";

/// Result of dispatching one console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    /// Print this reply and keep reading.
    Reply(String),
    /// Stop the console.
    Quit,
}

/// Parse and execute one console line.
pub fn dispatch(
    line: &str,
    sink: &SightingSink,
    cache: &RwLock<AliasCache>,
) -> CommandAction {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = tokens.split_first() else {
        return CommandAction::Reply(USAGE.to_owned());
    };

    match (command, args) {
        ("seen", [first, last, world]) => {
            let name = full_name(first, last);
            let world = capitalize_name_part(world);
            if sink.observe_chat(&name, &world) {
                CommandAction::Reply(format!("Queued {name} @ {world}."))
            } else {
                CommandAction::Reply(format!("{name} @ {world} is already pending."))
            }
        }
        ("roster", rest) if !rest.is_empty() && rest.len().is_multiple_of(3) => {
            let players: Vec<(String, String)> = rest
                .chunks_exact(3)
                .filter_map(|chunk| match chunk {
                    [first, last, world] => {
                        Some((full_name(first, last), capitalize_name_part(world)))
                    }
                    _ => None,
                })
                .collect();
            let queued =
                sink.observe_roster(players.iter().map(|(n, w)| (n.as_str(), w.as_str())));
            CommandAction::Reply(format!(
                "Queued {queued} of {} visible players.",
                players.len()
            ))
        }
        ("login", [first, last, world]) => {
            sink.observe_local_player(&full_name(first, last), &capitalize_name_part(world));
            CommandAction::Reply("Local player checked in.".to_owned())
        }
        ("logout", []) => {
            sink.local_player_gone();
            CommandAction::Reply("Local player gone.".to_owned())
        }
        ("whowas" | "whois", [first, last, world]) => {
            CommandAction::Reply(history(&cache.read(), first, last, world))
        }
        ("cached", []) => CommandAction::Reply(dump_cached(&cache.read())),
        ("quit" | "exit", _) => CommandAction::Quit,
        _ => CommandAction::Reply(USAGE.to_owned()),
    }
}

/// Look up the alias history for a character.
///
/// Name parts and world are normalized the same way the lookup path
/// normalizes them, then matched against every record's alias history.
pub fn history(cache: &AliasCache, first: &str, last: &str, world: &str) -> String {
    let name = full_name(first, last);
    let world = capitalize_name_part(world);

    let Some(record) = cache.find_by_alias(&name, &world) else {
        return "No character matching that query has been cached.".to_owned();
    };

    let mut out = format!("{name} @ {world} used to be:");
    for alias in record.aliases.iter() {
        out.push_str(&format!("\n   {} @ {}", alias.name, alias.world));
    }
    out
}

/// List every cached record: first-seen alias on the headline, later
/// aliases indented beneath it.
pub fn dump_cached(cache: &AliasCache) -> String {
    let mut out = format!("{} players cached.", cache.len());
    for record in cache.records() {
        if let Some(first) = record.aliases.first() {
            out.push_str(&format!("\n{} @ {}", first.name, first.world));
        }
        for alias in record.aliases.iter().skip(1) {
            out.push_str(&format!("\n   {} @ {}", alias.name, alias.world));
        }
    }
    out
}

/// Join and capitalize the two name parts.
fn full_name(first: &str, last: &str) -> String {
    format!(
        "{} {}",
        capitalize_name_part(first),
        capitalize_name_part(last)
    )
}
