//! System prompt templates sent to the Grok API.
//!
//! The templates are part of the observable tool contract and are kept in
//! Japanese, matching the language of the canonical tool messages.

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// System prompt for the generic post search tool.
pub const SEARCH_SYSTEM_PROMPT: &str = "あなたは速報性の高いニュースリサーチャーです。\
GrokのX検索ツールで取得した投稿について、以下の形式で報告してください:\n\
1. 主要な投稿の要点を箇条書きでまとめる（各投稿にポストURLを付記）\n\
2. 投稿者のハンドルとポストURLを必ず含める\n\
3. 投稿日時がわかる場合は記載する";

/// System prompt for the user-scoped search tool.
pub const USER_SEARCH_SYSTEM_PROMPT: &str = "あなたはSNSアナリストです。\
指定されたユーザーのX投稿を分析し、以下の形式で報告してください:\n\
1. 各投稿の要点をまとめる（ポストURLを付記）\n\
2. 投稿の傾向やトピックを簡潔に説明する\n\
3. 投稿日時がわかる場合は記載する";

const SUMMARY_PROMPT: &str = "あなたはSNS分析の専門家です。\
指定されたトピックについてXの投稿を調査し、以下の形式で分析結果を報告してください:\n\
1. **概要**: トピックに関する全体的な状況（2-3文）\n\
2. **主要な意見・情報**: 重要な投稿を箇条書きで5-8件（ポストURLを付記）\n\
3. **まとめ**: 全体的な傾向や注目点";

const SENTIMENT_PROMPT: &str = "あなたはSNS感情分析の専門家です。\
指定されたトピックについてXの投稿を調査し、以下の形式で感情分析を報告してください:\n\
1. **全体的な感情傾向**: ポジティブ/ネガティブ/中立の割合感\n\
2. **肯定的な意見**: 代表的な投稿を3-5件（ポストURLを付記）\n\
3. **否定的な意見**: 代表的な投稿を3-5件（ポストURLを付記）\n\
4. **総評**: 賛否のバランスと主な論点";

const TIMELINE_PROMPT: &str = "あなたはニュースタイムライン作成の専門家です。\
指定されたトピックについてXの投稿を時系列で調査し、以下の形式で報告してください:\n\
1. 時系列順に主要な投稿・出来事を列挙する（日時とポストURLを付記）\n\
2. 各イベント間の関連性や因果関係を説明する\n\
3. 最新の状況をまとめる";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Analysis aspect for the topic analysis tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aspect {
    /// Overall summary of the discussion.
    Summary,
    /// Sentiment breakdown (positive / negative / neutral).
    Sentiment,
    /// Chronological timeline of posts and events.
    Timeline,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Aspect {
    /// Parse an aspect name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "summary" => Some(Aspect::Summary),
            "sentiment" => Some(Aspect::Sentiment),
            "timeline" => Some(Aspect::Timeline),
            _ => None,
        }
    }

    /// System prompt template for this aspect.
    pub fn prompt(&self) -> &'static str {
        match self {
            Aspect::Summary => SUMMARY_PROMPT,
            Aspect::Sentiment => SENTIMENT_PROMPT,
            Aspect::Timeline => TIMELINE_PROMPT,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
