//! Turns gitmoji shortcodes such as `:sparkles:` into the emoji they stand for.

const GITMOJIS: &[(&str, &str)] = &[
    ("adhesive_bandage", "🩹"),
    ("airplane", "✈️"),
    ("alembic", "⚗️"),
    ("alien", "👽"),
    ("ambulance", "🚑"),
    ("apple", "🍎"),
    ("arrow_down", "⬇️"),
    ("arrow_left", "⬅️"),
    ("arrow_right", "➡️"),
    ("arrow_up", "⬆️"),
    ("art", "🎨"),
    ("beers", "🍻"),
    ("bento", "🍱"),
    ("bookmark", "🔖"),
    ("books", "📚"),
    ("boom", "💥"),
    ("bricks", "🧱"),
    ("bug", "🐛"),
    ("building_construction", "🏗️"),
    ("bulb", "💡"),
    ("busts_in_silhouette", "👥"),
    ("camera_flash", "📸"),
    ("card_file_box", "🗃️"),
    ("chart_with_upwards_trend", "📈"),
    ("check_mark", "✔️"),
    ("children_crossing", "🚸"),
    ("closed_lock_with_key", "🔐"),
    ("clown_face", "🤡"),
    ("coffin", "⚰️"),
    ("construction", "🚧"),
    ("construction_worker", "👷"),
    ("dizzy", "💫"),
    ("egg", "🥚"),
    ("fire", "🔥"),
    ("gear", "⚙️"),
    ("globe_with_meridians", "🌐"),
    ("goal_net", "🥅"),
    ("green_heart", "💚"),
    ("hammer", "🔨"),
    ("heart", "❤️"),
    ("heavy_check_mark", "✔️"),
    ("heavy_minus_sign", "➖"),
    ("heavy_plus_sign", "➕"),
    ("house", "🏡"),
    ("iphone", "📱"),
    ("label", "🏷️"),
    ("lipstick", "💄"),
    ("lock", "🔒"),
    ("lock_with_ink_pen", "🔏"),
    ("loud_sound", "🔊"),
    ("mag", "🔍"),
    ("memo", "📝"),
    ("money_with_wings", "💸"),
    ("monocle_face", "🧐"),
    ("mute", "🔇"),
    ("necktie", "👔"),
    ("package", "📦"),
    ("page_facing_up", "📄"),
    ("passport_control", "🛂"),
    ("pencil", "📝"),
    ("pencil2", "✏️"),
    ("poop", "💩"),
    ("pushpin", "📌"),
    ("recycle", "♻️"),
    ("rewind", "⏪"),
    ("robot", "🤖"),
    ("rocket", "🚀"),
    ("rotating_light", "🚨"),
    ("safety_vest", "🦺"),
    ("see_no_evil", "🙈"),
    ("seedling", "🌱"),
    ("sparkles", "✨"),
    ("speech_balloon", "💬"),
    ("stethoscope", "🩺"),
    ("tada", "🎉"),
    ("technologist", "🧑‍💻"),
    ("test_tube", "🧪"),
    ("thread", "🧵"),
    ("triangular_flag_on_post", "🚩"),
    ("truck", "🚚"),
    ("twisted_rightwards_arrows", "🔀"),
    ("warning", "⚠️"),
    ("wastebasket", "🗑️"),
    ("wheelchair", "♿"),
    ("white_check_mark", "✅"),
    ("wrench", "🔧"),
    ("x", "❌"),
    ("zap", "⚡️"),
];

/// Looks up the emoji for a shortcode name (without the colons)
pub fn emoji_for(code: &str) -> Option<&'static str> {
    GITMOJIS
        .binary_search_by(|(c, _)| (*c).cmp(code))
        .ok()
        .map(|i| GITMOJIS[i].1)
}

/// Replaces every known `:shortcode:` in `content` with its emoji. Unknown
/// shortcodes are left alone. With `with_space`, an emoji directly followed by
/// text gets a space after it, i.e. `:bug:fix` becomes `🐛 fix`.
///
/// # Example
///
/// ```
/// # use chlog::gitmoji;
/// assert_eq!(gitmoji::convert(":sparkles:New :nope: thing", true), "✨ New :nope: thing");
/// ```
pub fn convert(content: &str, with_space: bool) -> String {
    let re = regex!(r":([a-z0-9_+\-]+):");
    let mut out = String::with_capacity(content.len());
    let mut last = 0;

    for caps in re.captures_iter(content) {
        let (Some(m), Some(code)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(emoji) = emoji_for(code.as_str()) else {
            continue;
        };
        out.push_str(&content[last..m.start()]);
        out.push_str(emoji);
        if with_space
            && content[m.end()..]
                .chars()
                .next()
                .is_some_and(|c| !c.is_whitespace())
        {
            out.push(' ');
        }
        last = m.end();
    }
    out.push_str(&content[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted() {
        assert!(GITMOJIS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn converts_known_codes() {
        assert_eq!(convert(":bug: crash on start", true), "🐛 crash on start");
        assert_eq!(convert(":bug:crash", true), "🐛 crash");
        assert_eq!(convert(":bug:crash", false), "🐛crash");
        assert_eq!(convert("end :tada:", true), "end 🎉");
    }

    #[test]
    fn leaves_unknown_and_plain_text() {
        assert_eq!(convert("a :not_a_moji: b", true), "a :not_a_moji: b");
        assert_eq!(convert("time 10:30:00", true), "time 10:30:00");
        assert_eq!(convert("", true), "");
    }

    #[test]
    fn less_common_codes() {
        assert_eq!(
            convert(":closed_lock_with_key: :pencil: :heavy_check_mark: :arrow_right:", true),
            "🔐 📝 ✔️ ➡️"
        );
    }

    #[test]
    fn adjacent_codes() {
        assert_eq!(convert(":fire::zap:", true), "🔥 ⚡️");
    }
}
