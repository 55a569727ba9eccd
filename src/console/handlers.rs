//! Command handlers.
//!
//! Thin glue between the console surface and the [`ConfigStore`]: each
//! handler validates its arguments against the field's domain, mutates the
//! record only on a clean pass, and echoes the affected display section so
//! the user sees the result without a second command. Argument problems
//! print the command's usage line and mutate nothing.
//!
//! [`ConfigStore`]: crate::store::ConfigStore

use core::fmt::Write;

use crate::config::{ConfigRecord, SPIN_UNITS_MAX, SPIN_UNITS_MIN};

use super::matcher::{match_prefix, Match};
use super::registry::CommandRegistry;
use super::CommandContext;

/// Register the full command set. Called once from the boot sequence.
pub fn register_all(registry: &mut CommandRegistry) {
    registry.register("display", handle_display, "Display current config.");
    registry.register("level", handle_level, "Set light brightness level.");
    registry.register("spin", handle_spin, "Set spinner units per turn.");
    registry.register("hid", handle_hid, "Set HID report mode.");
    registry.register("save", handle_save, "Save config to flash.");
    registry.register("factory", handle_factory, "Restore factory defaults.");
}

// ── Display sections ──────────────────────────────────────────

fn disp_light(record: &ConfigRecord, out: &mut dyn Write) {
    let _ = writeln!(out, "[Light]");
    let _ = writeln!(out, "  Level: {}.", record.light.level);
}

fn disp_spin(record: &ConfigRecord, out: &mut dyn Write) {
    let _ = writeln!(out, "[Spin]");
    let _ = writeln!(out, "  Units per turn: {}.", record.spin.units_per_turn);
}

fn disp_hid(record: &ConfigRecord, out: &mut dyn Write) {
    let _ = writeln!(out, "[HID]");
    let _ = writeln!(
        out,
        "  Joy: {}, NKRO: {}.",
        on_off(record.hid.joy),
        on_off(record.hid.nkro)
    );
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

/// Strict non-negative decimal: no sign, no whitespace, no trailing junk.
fn parse_uint(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

// ── Handlers ──────────────────────────────────────────────────

fn handle_display(ctx: &mut CommandContext<'_>, args: &[&str], out: &mut dyn Write) {
    const USAGE: &str = "Usage: display [light|spin|hid]";
    if args.len() > 1 {
        let _ = writeln!(out, "{USAGE}");
        return;
    }
    let record = ctx.store.record();
    if args.is_empty() {
        disp_light(record, out);
        disp_spin(record, out);
        disp_hid(record, out);
        return;
    }
    match match_prefix(["light", "spin", "hid"], args[0]) {
        Match::Matched(0) => disp_light(record, out),
        Match::Matched(1) => disp_spin(record, out),
        Match::Matched(2) => disp_hid(record, out),
        _ => {
            let _ = writeln!(out, "{USAGE}");
        }
    }
}

fn handle_level(ctx: &mut CommandContext<'_>, args: &[&str], out: &mut dyn Write) {
    const USAGE: &str = "Usage: level <0..255>";
    let level = match args {
        [token] => parse_uint(token).filter(|v| *v <= 255),
        _ => None,
    };
    let Some(level) = level else {
        let _ = writeln!(out, "{USAGE}");
        return;
    };
    ctx.store.record_mut().light.level = level as u8;
    ctx.config_changed();
    disp_light(ctx.store.record(), out);
}

fn handle_spin(ctx: &mut CommandContext<'_>, args: &[&str], out: &mut dyn Write) {
    const USAGE: &str = "Usage: spin <units_per_turn>\n  units_per_turn: 20..255";
    let units = match args {
        [token] => parse_uint(token)
            .filter(|v| (u32::from(SPIN_UNITS_MIN)..=u32::from(SPIN_UNITS_MAX)).contains(v)),
        _ => None,
    };
    let Some(units) = units else {
        let _ = writeln!(out, "{USAGE}");
        return;
    };
    ctx.store.record_mut().spin.units_per_turn = units as u8;
    ctx.config_changed();
    disp_spin(ctx.store.record(), out);
}

fn handle_hid(ctx: &mut CommandContext<'_>, args: &[&str], out: &mut dyn Write) {
    const USAGE: &str = "Usage: hid <joy|nkro|both>";
    let [token] = args else {
        let _ = writeln!(out, "{USAGE}");
        return;
    };
    match match_prefix(["joy", "nkro", "both"], token) {
        Match::Matched(sel) => {
            // The selection rewrites both flags: picking one mode turns the
            // other off.
            let hid = &mut ctx.store.record_mut().hid;
            hid.joy = sel == 0 || sel == 2;
            hid.nkro = sel == 1 || sel == 2;
            ctx.config_changed();
            disp_hid(ctx.store.record(), out);
        }
        Match::Ambiguous | Match::NoMatch => {
            let _ = writeln!(out, "{USAGE}");
        }
    }
}

fn handle_save(ctx: &mut CommandContext<'_>, _args: &[&str], out: &mut dyn Write) {
    match ctx.persist.request_save(true, ctx.store, ctx.flash) {
        Ok(_) => {
            let _ = writeln!(out, "Saved.");
        }
        Err(e) => {
            // Store stays dirty; a later save retries.
            let _ = writeln!(out, "Save failed: {e}.");
        }
    }
}

fn handle_factory(ctx: &mut CommandContext<'_>, _args: &[&str], out: &mut dyn Write) {
    ctx.store.factory_reset();
    ctx.persist.note_mutation();
    let _ = writeln!(out, "Factory reset done.");
}
