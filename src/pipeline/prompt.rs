//! Instruction template for the completion service.

const INSTRUCTION_TEMPLATE: &str = r#"あなたは自転車ルートプランナーです。以下の入力に基づいて、自転車での走行に適したルートを提案してください。

ユーザーのルート候補の入力: {user_input}

入力から出発地点を抽出し、その周辺の自転車で走りやすいルートを提案してください。
入力に出発地点が含まれない場合は「{start_location_name}」を出発地点としてください。

以下の形式でJSONのみを返してください（必ず有効なJSONフォーマットで）:
{
    "start_location": {
        "name": "{start_location_name}"
    },
    "constraints": {
        "radius_km": 100,
        "route_count": 3
    },
    "suggested_routes": [
        {
            "direction": "方角（例：北東）",
            "waypoints": [
                {
                    "name": "実在する経由地点の名前",
                    "description": "場所の説明や特徴"
                }
            ],
            "description": "ルートの詳細な説明（距離、特徴、見所など）"
        }
    ]
}

注意：
1. 出発地点は必ずユーザー入力から抽出してください
2. 経由地点は必ず実在する場所を指定してください
3. 各ルートは指定された半径（radius_km）の圏内に収まるようにしてください
4. 説明は具体的に記載してください
"#;

const USER_INPUT: &str = "{user_input}";
const START_LOCATION_NAME: &str = "{start_location_name}";

/// Render the instruction sent to the completion service.
///
/// Placeholders are only recognised in the template itself. Substituted
/// text is copied verbatim, so braces in the prompt or the start name never
/// expand.
pub fn render_instruction(user_input: &str, start_location_name: &str) -> String {
    let mut rendered = String::with_capacity(
        INSTRUCTION_TEMPLATE.len() + user_input.len() + 2 * start_location_name.len(),
    );
    let mut rest = INSTRUCTION_TEMPLATE;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let tail = &rest[open..];
        if let Some(after) = tail.strip_prefix(USER_INPUT) {
            rendered.push_str(user_input);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(START_LOCATION_NAME) {
            rendered.push_str(start_location_name);
            rest = after;
        } else {
            rendered.push('{');
            rest = &tail[1..];
        }
    }
    rendered.push_str(rest);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_embeds_prompt_and_start() {
        let text = render_instruction("100km圏内のルートを3つ", "樟葉駅");
        assert!(text.contains("ユーザーのルート候補の入力: 100km圏内のルートを3つ"));
        assert!(text.contains(r#""name": "樟葉駅""#));
        assert!(text.contains("「樟葉駅」を出発地点"));
        assert!(!text.contains(USER_INPUT));
        assert!(!text.contains(START_LOCATION_NAME));
    }

    #[test]
    fn test_render_keeps_json_braces() {
        let text = render_instruction("p", "s");
        assert!(text.contains("\"start_location\": {"));
        assert!(text.trim_end().ends_with("説明は具体的に記載してください"));
    }

    #[test]
    fn test_render_keeps_user_braces() {
        let text = render_instruction("{start_location_name} {x}", "京都駅");
        assert!(text.contains("入力: {start_location_name} {x}"));
        assert!(!text.contains("入力: 京都駅"));
    }

    #[test]
    fn test_start_name_placeholder_text_is_not_expanded() {
        let text = render_instruction("淀川沿い", "{user_input}");
        assert!(text.contains(r#""name": "{user_input}""#));
        assert!(text.contains("「{user_input}」を出発地点"));
        assert_eq!(text.matches("淀川沿い").count(), 1);
    }
}
