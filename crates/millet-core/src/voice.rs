//! Single-turn voice command replies.
//!
//! A transcript is matched against keyword sets that cover every supported
//! language at once, so an English keyword still matches while the UI runs
//! in Tamil. The reply is then taken from the active language's table.

use millet_types::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Price,
    Weather,
    Product,
    Advisory,
    Default,
}

/// Match priority: the first intent with a hit wins.
const KEYWORDS: [(Intent, &[&str]); 4] = [
    (Intent::Price, &["price", "rate", "दाम", "ధర", "விலை"]),
    (Intent::Weather, &["weather", "मौसम", "వాతావరణం", "வானிலை"]),
    (Intent::Product, &["product", "add", "उत्पाद", "ఉత్పత్తి", "தயாரிப்பு"]),
    (Intent::Advisory, &["advisory", "सलाह", "సలహా", "ஆலோசனை"]),
];

/// Classify a transcript. Substring match on the lower-cased text.
pub fn classify(transcript: &str) -> Intent {
    let text = transcript.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| text.contains(w)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Default)
}

fn replies(language: Language) -> &'static [(Intent, &'static str)] {
    match language {
        Language::En => &[
            (Intent::Price, "Current millet prices are looking good! Foxtail millet is at 65 rupees per kg, and Pearl millet is at 72 rupees per kg."),
            (Intent::Weather, "Today looks sunny with good conditions for harvesting. Temperature is moderate at 28 degrees."),
            (Intent::Product, "You can add your products from the dashboard. Just click on Add Product and fill in the details."),
            (Intent::Advisory, "For best results, ensure proper irrigation this week. Weather looks favorable for growth."),
            (Intent::Default, "How can I help you today? You can ask about prices, weather, products, or farming advice."),
        ],
        Language::Hi => &[
            (Intent::Price, "वर्तमान में बाजरा की कीमतें अच्छी हैं! कंगनी बाजरा 65 रुपये प्रति किलो और बाजरा 72 रुपये प्रति किलो है।"),
            (Intent::Weather, "आज धूप खिली है और फसल की कटाई के लिए अच्छी स्थिति है। तापमान 28 डिग्री है।"),
            (Intent::Product, "आप डैशबोर्ड से अपने उत्पाद जोड़ सकते हैं। बस उत्पाद जोड़ें पर क्लिक करें और विवरण भरें।"),
            (Intent::Advisory, "सर्वोत्तम परिणामों के लिए, इस सप्ताह उचित सिंचाई सुनिश्चित करें। मौसम विकास के लिए अनुकूल है।"),
            (Intent::Default, "मैं आज आपकी कैसे मदद कर सकता हूं? आप कीमतों, मौसम, उत्पादों या खेती की सलाह के बारे में पूछ सकते हैं।"),
        ],
        Language::Te => &[
            (Intent::Price, "ప్రస్తుతం జొన్నల ధరలు బాగున్నాయి! కొర్రలు 65 రూపాయలు కిలో మరియు సజ్జలు 72 రూపాయలు కిలో."),
            (Intent::Weather, "ఈరోజు ఎండగా ఉంది మరియు పంట కోత కోసం మంచి పరిస్థితులు ఉన్నాయి. ఉష్ణోగ్రత 28 డిగ్రీలు."),
            (Intent::Product, "మీరు డాష్‌బోర్డ్ నుండి మీ ఉత్పత్తులను జోడించవచ్చు. ఉత్పత్తిని జోడించు క్లిక్ చేసి వివరాలు పూరించండి."),
            (Intent::Advisory, "ఉత్తమ ఫలితాల కోసం, ఈ వారం సరైన నీటిపారుదల నిర్ధారించండి. వాతావరణం పెరుగుదలకు అనుకూలంగా ఉంది."),
            (Intent::Default, "ఈరోజు నేను మీకు ఎలా సహాయం చేయగలను? మీరు ధరలు, వాతావరణం, ఉత్పత్తులు లేదా వ్యవసాయ సలహా గురించి అడగవచ్చు."),
        ],
        Language::Ta => &[
            (Intent::Price, "தற்போது சிறுதானிய விலைகள் நன்றாக உள்ளன! தினை 65 ரூபாய் கிலோ மற்றும் கம்பு 72 ரூபாய் கிலோ."),
            (Intent::Weather, "இன்று வெயில் நன்றாக உள்ளது மற்றும் அறுவடைக்கு நல்ல நிலைமைகள் உள்ளன. வெப்பநிலை 28 டிகிரி."),
            (Intent::Product, "டாஷ்போர்டிலிருந்து உங்கள் தயாரிப்புகளைச் சேர்க்கலாம். பொருளைச் சேர் என்பதைக் கிளிக் செய்து விவரங்களை நிரப்பவும்."),
            (Intent::Advisory, "சிறந்த முடிவுகளுக்கு, இந்த வாரம் சரியான நீர்ப்பாசனத்தை உறுதி செய்யவும். வானிலை வளர்ச்சிக்கு சாதகமாக உள்ளது."),
            (Intent::Default, "இன்று நான் உங்களுக்கு எப்படி உதவ முடியும்? நீங்கள் விலைகள், வானிலை, தயாரிப்புகள் அல்லது விவசாய ஆலோசனை பற்றி கேட்கலாம்."),
        ],
    }
}

/// Canned reply for an intent; English when the language has no entry.
pub fn reply(intent: Intent, language: Language) -> &'static str {
    let find = |lang| {
        replies(lang)
            .iter()
            .find(|(i, _)| *i == intent)
            .map(|(_, text)| *text)
    };
    find(language)
        .or_else(|| find(Language::En))
        .unwrap_or_default()
}

/// Classify and answer in one step.
pub fn respond(transcript: &str, language: Language) -> &'static str {
    reply(classify(transcript), language)
}
