//! Score-band interpretation
//!
//! Maps zone scores to canned readings from the traditional line
//! catalogue. Band selection is a pure function of the score; the
//! output order follows the catalogue's declaration order, never the
//! scores.

use crate::models::{Category, Interpretation};
use crate::zones::NEUTRAL_SCORE;
use std::collections::BTreeMap;

/// Score band selecting which of the three readings is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    High,
    Mid,
    Low,
}

/// Strict band thresholds: score > 70 high, 40 < score <= 70 mid,
/// score <= 40 low.
pub fn band(score: f64) -> Band {
    if score > 70.0 {
        Band::High
    } else if score > 40.0 {
        Band::Mid
    } else {
        Band::Low
    }
}

struct LineEntry {
    zone: &'static str,
    line: &'static str,
    category: &'static str,
    high: &'static str,
    mid: &'static str,
    low: &'static str,
}

/// The traditional catalogue, in presentation order.
const LINES: [LineEntry; 9] = [
    LineEntry {
        zone: "heart_zone",
        line: "感情線",
        category: "love_marriage",
        high: "感情が豊かで、恋愛運に恵まれています。愛情表現が上手く、相手に尽くすタイプ。情熱的でロマンチックな恋愛を好み、周囲からも慕われやすいでしょう。",
        mid: "バランスの取れた恋愛観の持ち主。理性的でありながら、適度な情熱も兼ね備えています。相手を大切にし、安定した関係を築く傾向があります。",
        low: "控えめで慎重な性格。感情を表に出すより、内に秘める傾向があります。一度心を許した相手には深い愛情を注ぎ、長く続く絆を大切にします。",
    },
    LineEntry {
        zone: "marriage_zone",
        line: "結婚線",
        category: "love_marriage",
        high: "結婚運が強い方です。良縁に恵まれ、パートナーとの絆が深まりやすい傾向があります。家庭を大切にし、長く続く関係を築けるでしょう。",
        mid: "結婚に対して真摯な気持ちを持っています。相手を選ぶ目があり、慎重に考えた末に良いパートナーと結ばれる傾向があります。",
        low: "自由な恋愛観の持ち主。結婚は人生の選択肢の一つとして、焦らず自分らしいタイミングで考える傾向があります。",
    },
    LineEntry {
        zone: "head_zone",
        line: "知能線",
        category: "intelligence",
        high: "知的好奇心が旺盛で、学習意欲が高い方です。論理的思考に優れ、問題解決能力に長けています。",
        mid: "バランスの取れた思考力を持っています。直感と論理の両方を活用できる柔軟な頭脳の持ち主です。",
        low: "実践的で行動派。考えるより先に動くタイプ。経験から学ぶことが得意です。",
    },
    LineEntry {
        zone: "life_zone",
        line: "生命線",
        category: "health",
        high: "生命力が強く、健康運に恵まれています。活力に満ち、困難にも立ち向かう力があります。",
        mid: "安定した生命力。規則正しい生活を心がけることで、長く健康を維持できるでしょう。",
        low: "繊細な体質。休息とリフレッシュを大切にすることで、持てる力を最大限発揮できます。",
    },
    LineEntry {
        zone: "fate_zone",
        line: "運命線",
        category: "work_success",
        high: "キャリア運が強い方。運命に導かれる力があり、チャンスを掴む才能があります。努力が実を結びやすいでしょう。",
        mid: "自分で道を切り開く力があります。努力次第でキャリアを好転させられるタイプです。",
        low: "自由な精神の持ち主。型にはまらない生き方を好み、独自の道を歩む傾向があります。",
    },
    LineEntry {
        zone: "sun_zone",
        line: "太陽線",
        category: "work_success",
        high: "成功運・名声運に恵まれています。才能が開花しやすく、人から認められやすい傾向。芸術や創造の分野でも花開く可能性があります。",
        mid: "努力が報われやすいタイプ。地道な積み重ねが評価につながり、着実に成功に近づいていけるでしょう。",
        low: "内なる才能を秘めています。自分を表現する機会を大切にすると、隠れた能力が発揮されるでしょう。",
    },
    LineEntry {
        zone: "money_zone",
        line: "金運線",
        category: "money",
        high: "金運に恵まれる傾向があります。お金が入るチャンスに恵まれ、貯蓄や投資のセンスもあるでしょう。",
        mid: "堅実な金銭感覚の持ち主。計画的に貯めることが得意で、安定した財産形成が期待できます。",
        low: "お金より心の豊かさを大切にする傾向。必要な時に必要な分が入ってくる、流れに任せるタイプです。",
    },
    LineEntry {
        zone: "health_zone",
        line: "健康線",
        category: "health",
        high: "体のバランスが良く、自己治癒力が高い傾向。健康管理への意識が高く、長く元気でいられるでしょう。",
        mid: "体調の波はありますが、休息を取れば回復するタイプ。無理をしすぎないことが長く健康でいる秘訣です。",
        low: "繊細な体質。睡眠や食事を大切にし、ストレスを溜め込まない生活がおすすめです。",
    },
    LineEntry {
        zone: "intuition_zone",
        line: "直感線",
        category: "intuition",
        high: "直感力・第六感が鋭い方。ひらめきに恵まれ、スピリチュアルな感覚にも敏感。芸術やヒーリングの才能があるかもしれません。",
        mid: "時々「なんとなく」で正解を導くことがあります。自分の感覚を信じることで、より良い選択ができるでしょう。",
        low: "論理や経験を大切にするタイプ。直感を磨くには、静かに自分と向き合う時間を持つと良いでしょう。",
    },
];

/// Interpret every zone score against the catalogue. Missing zones fall
/// back to the neutral score.
pub fn interpret(analysis: &BTreeMap<String, f64>) -> Vec<Interpretation> {
    LINES
        .iter()
        .map(|entry| {
            let score = analysis.get(entry.zone).copied().unwrap_or(NEUTRAL_SCORE);
            let reading = match band(score) {
                Band::High => entry.high,
                Band::Mid => entry.mid,
                Band::Low => entry.low,
            };
            Interpretation {
                line: entry.line.to_string(),
                category: entry.category.to_string(),
                reading: reading.to_string(),
                score,
            }
        })
        .collect()
}

/// The fixed six-entry category catalogue.
pub fn categories() -> Vec<Category> {
    [
        ("love_marriage", "恋愛・結婚", "💕"),
        ("work_success", "仕事・成功", "💼"),
        ("money", "金運・財産", "💰"),
        ("health", "健康・生命力", "💪"),
        ("intelligence", "知性・才能", "📚"),
        ("intuition", "直感・スピリチュアル", "✨"),
    ]
    .iter()
    .map(|&(id, name, icon)| Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis_with(score: f64) -> BTreeMap<String, f64> {
        crate::zones::ZONES
            .iter()
            .map(|&(name, ..)| (name.to_string(), score))
            .collect()
    }

    #[test]
    fn test_band_boundaries_are_strict() {
        assert_eq!(band(70.0), Band::Mid);
        assert_eq!(band(70.01), Band::High);
        assert_eq!(band(40.0), Band::Low);
        assert_eq!(band(40.01), Band::Mid);
        assert_eq!(band(0.0), Band::Low);
        assert_eq!(band(100.0), Band::High);
    }

    #[test]
    fn test_interpret_returns_nine_in_declaration_order() {
        let interpretations = interpret(&analysis_with(50.0));
        assert_eq!(interpretations.len(), 9);
        let lines: Vec<&str> = interpretations.iter().map(|i| i.line.as_str()).collect();
        assert_eq!(
            lines,
            [
                "感情線", "結婚線", "知能線", "生命線", "運命線", "太陽線", "金運線", "健康線",
                "直感線"
            ]
        );
    }

    #[test]
    fn test_interpret_selects_band_texts() {
        let high = interpret(&analysis_with(90.0));
        let low = interpret(&analysis_with(10.0));
        assert!(high[0].reading.starts_with("感情が豊かで"));
        assert!(low[0].reading.starts_with("控えめで慎重な性格"));
        assert_ne!(high[0].reading, low[0].reading);
    }

    #[test]
    fn test_missing_zone_defaults_to_neutral() {
        let interpretations = interpret(&BTreeMap::new());
        for interpretation in &interpretations {
            assert_eq!(interpretation.score, NEUTRAL_SCORE);
        }
    }

    #[test]
    fn test_categories_catalogue_is_fixed() {
        let catalogue = categories();
        assert_eq!(catalogue.len(), 6);
        assert_eq!(catalogue[0].id, "love_marriage");
        assert_eq!(catalogue[5].id, "intuition");
    }

    #[test]
    fn test_interpretation_categories_come_from_catalogue() {
        let catalogue: Vec<String> = categories().into_iter().map(|c| c.id).collect();
        for interpretation in interpret(&analysis_with(55.0)) {
            assert!(catalogue.contains(&interpretation.category));
        }
    }
}
