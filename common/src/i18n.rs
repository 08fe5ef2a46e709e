//! UI文言の翻訳（チェコ語 / 英語）
//!
//! 未定義のキーはキー文字列をそのまま返す。

use serde::{Deserialize, Serialize};

/// 表示言語（初期値はチェコ語）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Cs,
    En,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::Cs => Language::En,
            Language::En => Language::Cs,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Cs => "cs",
            Language::En => "en",
        }
    }

    /// キーを翻訳
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        match TRANSLATIONS.iter().find(|(k, _, _)| *k == key) {
            Some((_, cs, en)) => match self {
                Language::Cs => cs,
                Language::En => en,
            },
            None => key,
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cs" | "cz" => Ok(Language::Cs),
            "en" => Ok(Language::En),
            _ => Err(format!("Unknown language: {}. Use cs or en", s)),
        }
    }
}

/// (キー, チェコ語, 英語)
const TRANSLATIONS: &[(&str, &str, &str)] = &[
    // ヘッダー
    ("title", "VinScout Procesor Dokumentů", "VinScout Document Processor"),
    (
        "subtitle",
        "Profesionální zpracování automobilových dokumentů pro extrakci VIN a SPZ",
        "Professional automotive document processing for VIN and license plate extraction",
    ),
    // タブ
    ("documentProcessing", "Zpracování Dokumentů", "Document Processing"),
    ("adminPanel", "Administrátorský Panel", "Admin Panel"),
    // 管理パネル
    ("systemSettings", "Nastavení Systému", "System Settings"),
    ("ocrConfidenceThreshold", "Práh spolehlivosti OCR", "OCR Confidence Threshold"),
    (
        "ocrConfidenceDesc",
        "Minimální úroveň spolehlivosti pro výsledky OCR (0-10)",
        "Minimum confidence level for OCR results (0-10)",
    ),
    ("maxFileSize", "Max. velikost souboru (MB)", "Max File Size (MB)"),
    (
        "maxFileSizeDesc",
        "Maximální povolená velikost souboru pro nahrání",
        "Maximum allowed file size for uploads",
    ),
    ("tesseractDataPath", "Cesta k datům Tesseract", "Tesseract Data Path"),
    (
        "tesseractDataDesc",
        "Cesta k souborům jazykových dat Tesseract OCR",
        "Path to Tesseract OCR language data files",
    ),
    ("saveSettings", "Uložit nastavení", "Save Settings"),
    ("systemLogs", "Systémové logy", "System Logs"),
    ("downloadLogs", "Stáhnout logy", "Download Logs"),
    ("viewDetails", "Zobrazit podrobnosti", "View Details"),
    ("noLogs", "Zatím žádné záznamy", "No log entries yet"),
    ("INFO", "INFO", "INFO"),
    ("WARN", "VAROVÁNÍ", "WARN"),
    ("SUCCESS", "ÚSPĚCH", "SUCCESS"),
    ("ERROR", "CHYBA", "ERROR"),
    // 保険フォーム
    ("insuranceDetails", "Pojistné Údaje", "Insurance Details"),
    ("clientInformation", "Informace o pojistníkovi", "Policyholder Information"),
    ("insuranceCoverage", "Pojistné krytí", "Insurance Coverage"),
    ("participation", "Spoluúčast", "Participation"),
    ("policyholderIco", "IČO pojistníka", "Policyholder ICO"),
    ("email", "E-mail", "Email"),
    ("phone", "Telefon", "Phone"),
    ("startOfInsurance", "Začátek pojištění", "Start of Insurance"),
    ("min", "Min", "Min"),
    ("max", "Max", "Max"),
    ("mandatoryInsurance", "Povinné ručení", "Mandatory Insurance"),
    ("accidentInsurance", "Havarijní pojištění", "Accident Insurance"),
    ("injuryInsurance", "Úrazové pojištění", "Injury Insurance"),
    ("windowsInsurance", "Pojištění skel", "Windows Insurance"),
    ("animalCollisions", "Střety se zvěří", "Animal Collisions"),
    ("luggage", "Zavazadla", "Luggage"),
    ("assistanceServices", "Asistenční služby", "Assistance Services"),
    ("vandalism", "Vandalismus", "Vandalism"),
    ("mandatoryInsuranceLimit", "Limit povinného ručení", "Mandatory Insurance Limit"),
    (
        "accidentInsuranceParticipation",
        "Spoluúčast havarijního pojištění",
        "Accident Insurance Participation",
    ),
    ("fixedAmount", "Pevná částka", "Fixed Amount"),
    ("percentageAmount", "Procentní částka", "Percentage Amount"),
    ("windowsInsuranceLimit", "Limit pojištění skel", "Windows Insurance Limit"),
    ("noLimit", "Bez limitu", "No Limit"),
    ("limit50mil", "50 mil. Kč / 50 mil. Kč – zákonné minimum", "50 mil. CZK / 50 mil. CZK – legal minimum"),
    ("limit70mil", "70 mil. Kč / 70 mil. Kč – nižší standard", "70 mil. CZK / 70 mil. CZK – lower standard"),
    (
        "limit100mil",
        "100 mil. Kč / 100 mil. Kč – doporučený standard",
        "100 mil. CZK / 100 mil. CZK – recommended standard",
    ),
    (
        "limit250mil",
        "250 mil. Kč / 250 mil. Kč – maximální ochrana",
        "250 mil. CZK / 250 mil. CZK – maximum protection",
    ),
    // アップロード
    ("documentUploadAndExtraction", "Nahrání dokumentů a extrakce VIN", "Document Upload & VIN Extraction"),
    (
        "dropFiles",
        "Přetáhněte dokumenty sem nebo klikněte pro výběr",
        "Drag & drop documents here, or click to select",
    ),
    (
        "supportedFormats",
        "Podporuje PDF, Excel (.xls, .xlsx), Word (.doc, .docx)",
        "Supports PDF, Excel (.xls, .xlsx), Word (.doc, .docx)",
    ),
    ("uploadedFiles", "Nahrané soubory:", "Uploaded Files:"),
    ("extractVins", "Extrahovat VIN", "Extract VINs"),
    ("extracting", "Extrakce...", "Extracting..."),
    ("extractionResults", "Výsledky extrakce:", "Extraction Results:"),
    ("manualVehicleAddition", "Ruční přidání vozidla", "Manual Vehicle Addition"),
    ("enterVinOrPlate", "Zadejte VIN nebo SPZ", "Enter VIN or License Plate"),
    ("manualEntries", "Ruční záznamy:", "Manual Entries:"),
    // 結果
    ("vehicleResults", "Výsledky Vozidel", "Vehicle Results"),
    (
        "noVehicles",
        "Zatím žádná vozidla dekódována. Extrahujte VIN z dokumentů a klikněte na \"Dekódovat\" pro zobrazení výsledků.",
        "No vehicles decoded yet. Extract VINs from documents and click \"Decode\" to see results here.",
    ),
    ("vin", "VIN", "VIN"),
    ("licensePlate", "SPZ", "License Plate"),
    ("mileage", "Nájezd", "Mileage"),
    ("vehicleValue", "Hodnota vozidla", "Vehicle Value"),
    ("ownerOperatorInfo", "Informace o vlastníkovi a provozovateli", "Owner & Operator Information"),
    ("ownerSameAsPolicyholder", "Vlastník shodný s pojistníkem", "Owner same as policyholder"),
    ("operatorSameAsPolicyholder", "Provozovatel shodný s pojistníkem", "Operator same as policyholder"),
    ("vehicleData", "Údaje o vozidle", "Vehicle Data"),
    ("type", "Typ", "Type"),
    ("manufacturer", "Výrobce", "Manufacturer"),
    ("model", "Model", "Model"),
    ("year", "Rok", "Year"),
    ("engine", "Motor", "Engine"),
    ("power", "Výkon", "Power"),
    ("maxWeight", "Max. hmotnost", "Max Weight"),
    ("seats", "Sedadla", "Seats"),
    ("fuelType", "Palivo", "Fuel"),
    ("exportJson", "Exportovat JSON", "Export JSON"),
    ("downloadForm", "Stáhnout formulář", "Download Form"),
    ("changeIndividualCoverage", "Změnit individuální pojistné krytí", "Change individual insurance coverage"),
    (
        "keepSameCoverage",
        "Zachovat pojistné krytí stejné jako zbytek flotily",
        "Keep insurance coverage same as the rest of the fleet",
    ),
    // ボタン
    ("decode", "Dekódovat", "Decode"),
    ("decoding", "Dekódování...", "Decoding..."),
    // ダイアログ
    ("unextractedFiles", "Neextrahované soubory", "Unextracted Files"),
    (
        "unextractedFilesDesc",
        "Jsou zde soubory, které ještě nebyly extrahovány. Co chcete udělat?",
        "There are files that haven't been extracted yet. What would you like to do?",
    ),
    ("extract", "Extrahovat", "Extract"),
    // ファイル状態
    ("processing", "Zpracování...", "Processing..."),
    ("success", "Úspěch", "Success"),
    ("error", "Chyba", "Error"),
    // プレースホルダー
    ("enterMileage", "Zadejte nájezd", "Enter mileage"),
    ("enterVehicleValue", "Zadejte hodnotu vozidla", "Enter vehicle value"),
    ("enterOwnerIco", "Zadejte IČO vlastníka", "Enter owner ICO"),
    ("enterOperatorIco", "Zadejte IČO provozovatele", "Enter operator ICO"),
    ("vinPlaceholder", "17-znakový VIN", "17-character VIN"),
    ("platePlaceholder", "XXX-XXXX", "XXX-XXXX"),
    ("enterPolicyholderIco", "Zadejte IČO pojistníka", "Enter policyholder ICO"),
    ("enterEmail", "Zadejte e-mailovou adresu", "Enter email address"),
    ("enterPhone", "Zadejte telefonní číslo", "Enter phone number"),
    // 抽出結果
    ("vinsFound", "VIN nalezeno", "VIN(s) found"),
    ("noVinsFound", "Žádné VIN nenalezeno", "No VINs found"),
];
