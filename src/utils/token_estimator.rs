/// Token估算器，用于估算文本的token数量以及按token预算截取文本
pub struct TokenEstimator {
    rules: TokenCalculationRules,
}

/// Token计算规则
#[derive(Debug, Clone)]
pub struct TokenCalculationRules {
    /// 英文字符的平均token比例（字符数/token数）
    pub english_char_per_token: f64,
    /// 中文字符的平均token比例
    pub chinese_char_per_token: f64,
}

impl Default for TokenCalculationRules {
    fn default() -> Self {
        Self {
            // 基于GPT系列模型的经验值
            english_char_per_token: 4.0,
            chinese_char_per_token: 1.5,
        }
    }
}

impl Default for TokenEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenEstimator {
    pub fn new() -> Self {
        Self {
            rules: TokenCalculationRules::default(),
        }
    }

    /// 估算文本的token数量
    pub fn estimate_tokens(&self, text: &str) -> usize {
        let cost: f64 = text.chars().map(|c| self.char_cost(c)).sum();
        cost.ceil() as usize
    }

    /// 截取不超过 `max_tokens` 的最长前缀，保证落在字符边界上
    pub fn truncate_to_tokens<'a>(&self, text: &'a str, max_tokens: usize) -> &'a str {
        let budget = max_tokens as f64;
        let mut spent = 0.0;
        for (idx, c) in text.char_indices() {
            spent += self.char_cost(c);
            if spent > budget {
                return &text[..idx];
            }
        }
        text
    }

    /// 单个字符消耗的token
    fn char_cost(&self, c: char) -> f64 {
        if self.is_chinese_char(c) {
            1.0 / self.rules.chinese_char_per_token
        } else {
            1.0 / self.rules.english_char_per_token
        }
    }

    /// 判断是否为中文字符
    fn is_chinese_char(&self, c: char) -> bool {
        matches!(c as u32,
            0x4E00..=0x9FFF |  // CJK统一汉字
            0x3400..=0x4DBF |  // CJK扩展A
            0x20000..=0x2A6DF | // CJK扩展B
            0x2A700..=0x2B73F | // CJK扩展C
            0x2B740..=0x2B81F | // CJK扩展D
            0x2B820..=0x2CEAF | // CJK扩展E
            0x2CEB0..=0x2EBEF | // CJK扩展F
            0x30000..=0x3134F   // CJK扩展G
        )
    }
}
