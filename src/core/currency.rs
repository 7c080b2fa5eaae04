//! Currency codes and the static reference table of known currencies

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid currency code: '{0}'")]
pub struct InvalidCurrencyCode(pub String);

/// A three-letter uppercase ISO-style currency code, e.g. `USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name and issuing country, if the code is in the reference table.
    pub fn details(&self) -> Option<&'static CurrencyInfo> {
        lookup(&self.0)
    }

    pub fn is_known(&self) -> bool {
        self.details().is_some()
    }
}

impl FromStr for CurrencyCode {
    type Err = InvalidCurrencyCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(CurrencyCode(code))
        } else {
            Err(InvalidCurrencyCode(s.to_string()))
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub country: &'static str,
}

impl CurrencyInfo {
    const fn new(code: &'static str, name: &'static str, country: &'static str) -> Self {
        CurrencyInfo {
            code,
            name,
            country,
        }
    }
}

/// Finds a currency by its exact uppercase code.
pub fn lookup(code: &str) -> Option<&'static CurrencyInfo> {
    CURRENCIES
        .binary_search_by(|info| info.code.cmp(code))
        .ok()
        .map(|index| &CURRENCIES[index])
}

/// All known currencies, ordered by code.
pub fn all() -> &'static [CurrencyInfo] {
    CURRENCIES
}

// Sorted by code; `lookup` relies on it.
static CURRENCIES: &[CurrencyInfo] = &[
    CurrencyInfo::new("AED", "UAE Dirham", "United Arab Emirates"),
    CurrencyInfo::new("AFN", "Afghan Afghani", "Afghanistan"),
    CurrencyInfo::new("ALL", "Albanian Lek", "Albania"),
    CurrencyInfo::new("AMD", "Armenian Dram", "Armenia"),
    CurrencyInfo::new("ANG", "Netherlands Antillian Guilder", "Netherlands Antilles"),
    CurrencyInfo::new("AOA", "Angolan Kwanza", "Angola"),
    CurrencyInfo::new("ARS", "Argentine Peso", "Argentina"),
    CurrencyInfo::new("AUD", "Australian Dollar", "Australia"),
    CurrencyInfo::new("AWG", "Aruban Florin", "Aruba"),
    CurrencyInfo::new("AZN", "Azerbaijani Manat", "Azerbaijan"),
    CurrencyInfo::new("BAM", "Bosnia and Herzegovina Mark", "Bosnia and Herzegovina"),
    CurrencyInfo::new("BBD", "Barbados Dollar", "Barbados"),
    CurrencyInfo::new("BDT", "Bangladeshi Taka", "Bangladesh"),
    CurrencyInfo::new("BGN", "Bulgarian Lev", "Bulgaria"),
    CurrencyInfo::new("BHD", "Bahraini Dinar", "Bahrain"),
    CurrencyInfo::new("BIF", "Burundian Franc", "Burundi"),
    CurrencyInfo::new("BMD", "Bermudian Dollar", "Bermuda"),
    CurrencyInfo::new("BND", "Brunei Dollar", "Brunei"),
    CurrencyInfo::new("BOB", "Bolivian Boliviano", "Bolivia"),
    CurrencyInfo::new("BRL", "Brazilian Real", "Brazil"),
    CurrencyInfo::new("BSD", "Bahamian Dollar", "Bahamas"),
    CurrencyInfo::new("BTN", "Bhutanese Ngultrum", "Bhutan"),
    CurrencyInfo::new("BWP", "Botswana Pula", "Botswana"),
    CurrencyInfo::new("BYN", "Belarusian Ruble", "Belarus"),
    CurrencyInfo::new("BZD", "Belize Dollar", "Belize"),
    CurrencyInfo::new("CAD", "Canadian Dollar", "Canada"),
    CurrencyInfo::new("CDF", "Congolese Franc", "Democratic Republic of the Congo"),
    CurrencyInfo::new("CHF", "Swiss Franc", "Switzerland"),
    CurrencyInfo::new("CLP", "Chilean Peso", "Chile"),
    CurrencyInfo::new("CNY", "Chinese Renminbi", "China"),
    CurrencyInfo::new("COP", "Colombian Peso", "Colombia"),
    CurrencyInfo::new("CRC", "Costa Rican Colon", "Costa Rica"),
    CurrencyInfo::new("CUP", "Cuban Peso", "Cuba"),
    CurrencyInfo::new("CVE", "Cape Verdean Escudo", "Cape Verde"),
    CurrencyInfo::new("CZK", "Czech Koruna", "Czech Republic"),
    CurrencyInfo::new("DJF", "Djiboutian Franc", "Djibouti"),
    CurrencyInfo::new("DKK", "Danish Krone", "Denmark"),
    CurrencyInfo::new("DOP", "Dominican Peso", "Dominican Republic"),
    CurrencyInfo::new("DZD", "Algerian Dinar", "Algeria"),
    CurrencyInfo::new("EGP", "Egyptian Pound", "Egypt"),
    CurrencyInfo::new("ERN", "Eritrean Nakfa", "Eritrea"),
    CurrencyInfo::new("ETB", "Ethiopian Birr", "Ethiopia"),
    CurrencyInfo::new("EUR", "Euro", "European Union"),
    CurrencyInfo::new("FJD", "Fiji Dollar", "Fiji"),
    CurrencyInfo::new("FKP", "Falkland Islands Pound", "Falkland Islands"),
    CurrencyInfo::new("FOK", "Faroese Króna", "Faroe Islands"),
    CurrencyInfo::new("GBP", "Pound Sterling", "United Kingdom"),
    CurrencyInfo::new("GEL", "Georgian Lari", "Georgia"),
    CurrencyInfo::new("GGP", "Guernsey Pound", "Guernsey"),
    CurrencyInfo::new("GHS", "Ghanaian Cedi", "Ghana"),
    CurrencyInfo::new("GIP", "Gibraltar Pound", "Gibraltar"),
    CurrencyInfo::new("GMD", "Gambian Dalasi", "The Gambia"),
    CurrencyInfo::new("GNF", "Guinean Franc", "Guinea"),
    CurrencyInfo::new("GTQ", "Guatemalan Quetzal", "Guatemala"),
    CurrencyInfo::new("GYD", "Guyanese Dollar", "Guyana"),
    CurrencyInfo::new("HKD", "Hong Kong Dollar", "Hong Kong"),
    CurrencyInfo::new("HNL", "Honduran Lempira", "Honduras"),
    CurrencyInfo::new("HRK", "Croatian Kuna", "Croatia"),
    CurrencyInfo::new("HTG", "Haitian Gourde", "Haiti"),
    CurrencyInfo::new("HUF", "Hungarian Forint", "Hungary"),
    CurrencyInfo::new("IDR", "Indonesian Rupiah", "Indonesia"),
    CurrencyInfo::new("ILS", "Israeli New Shekel", "Israel"),
    CurrencyInfo::new("IMP", "Manx Pound", "Isle of Man"),
    CurrencyInfo::new("INR", "Indian Rupee", "India"),
    CurrencyInfo::new("IQD", "Iraqi Dinar", "Iraq"),
    CurrencyInfo::new("IRR", "Iranian Rial", "Iran"),
    CurrencyInfo::new("ISK", "Icelandic Króna", "Iceland"),
    CurrencyInfo::new("JEP", "Jersey Pound", "Jersey"),
    CurrencyInfo::new("JMD", "Jamaican Dollar", "Jamaica"),
    CurrencyInfo::new("JOD", "Jordanian Dinar", "Jordan"),
    CurrencyInfo::new("JPY", "Japanese Yen", "Japan"),
    CurrencyInfo::new("KES", "Kenyan Shilling", "Kenya"),
    CurrencyInfo::new("KGS", "Kyrgyzstani Som", "Kyrgyzstan"),
    CurrencyInfo::new("KHR", "Cambodian Riel", "Cambodia"),
    CurrencyInfo::new("KID", "Kiribati Dollar", "Kiribati"),
    CurrencyInfo::new("KMF", "Comorian Franc", "Comoros"),
    CurrencyInfo::new("KRW", "South Korean Won", "South Korea"),
    CurrencyInfo::new("KWD", "Kuwaiti Dinar", "Kuwait"),
    CurrencyInfo::new("KYD", "Cayman Islands Dollar", "Cayman Islands"),
    CurrencyInfo::new("KZT", "Kazakhstani Tenge", "Kazakhstan"),
    CurrencyInfo::new("LAK", "Lao Kip", "Laos"),
    CurrencyInfo::new("LBP", "Lebanese Pound", "Lebanon"),
    CurrencyInfo::new("LKR", "Sri Lanka Rupee", "Sri Lanka"),
    CurrencyInfo::new("LRD", "Liberian Dollar", "Liberia"),
    CurrencyInfo::new("LSL", "Lesotho Loti", "Lesotho"),
    CurrencyInfo::new("LYD", "Libyan Dinar", "Libya"),
    CurrencyInfo::new("MAD", "Moroccan Dirham", "Morocco"),
    CurrencyInfo::new("MDL", "Moldovan Leu", "Moldova"),
    CurrencyInfo::new("MGA", "Malagasy Ariary", "Madagascar"),
    CurrencyInfo::new("MKD", "Macedonian Denar", "North Macedonia"),
    CurrencyInfo::new("MMK", "Burmese Kyat", "Myanmar"),
    CurrencyInfo::new("MNT", "Mongolian Tögrög", "Mongolia"),
    CurrencyInfo::new("MOP", "Macanese Pataca", "Macau"),
    CurrencyInfo::new("MRU", "Mauritanian Ouguiya", "Mauritania"),
    CurrencyInfo::new("MUR", "Mauritian Rupee", "Mauritius"),
    CurrencyInfo::new("MVR", "Maldivian Rufiyaa", "Maldives"),
    CurrencyInfo::new("MWK", "Malawian Kwacha", "Malawi"),
    CurrencyInfo::new("MXN", "Mexican Peso", "Mexico"),
    CurrencyInfo::new("MYR", "Malaysian Ringgit", "Malaysia"),
    CurrencyInfo::new("MZN", "Mozambican Metical", "Mozambique"),
    CurrencyInfo::new("NAD", "Namibian Dollar", "Namibia"),
    CurrencyInfo::new("NGN", "Nigerian Naira", "Nigeria"),
    CurrencyInfo::new("NIO", "Nicaraguan Córdoba", "Nicaragua"),
    CurrencyInfo::new("NOK", "Norwegian Krone", "Norway"),
    CurrencyInfo::new("NPR", "Nepalese Rupee", "Nepal"),
    CurrencyInfo::new("NZD", "New Zealand Dollar", "New Zealand"),
    CurrencyInfo::new("OMR", "Omani Rial", "Oman"),
    CurrencyInfo::new("PAB", "Panamanian Balboa", "Panama"),
    CurrencyInfo::new("PEN", "Peruvian Sol", "Peru"),
    CurrencyInfo::new("PGK", "Papua New Guinean Kina", "Papua New Guinea"),
    CurrencyInfo::new("PHP", "Philippine Peso", "Philippines"),
    CurrencyInfo::new("PKR", "Pakistani Rupee", "Pakistan"),
    CurrencyInfo::new("PLN", "Polish Złoty", "Poland"),
    CurrencyInfo::new("PYG", "Paraguayan Guaraní", "Paraguay"),
    CurrencyInfo::new("QAR", "Qatari Riyal", "Qatar"),
    CurrencyInfo::new("RON", "Romanian Leu", "Romania"),
    CurrencyInfo::new("RSD", "Serbian Dinar", "Serbia"),
    CurrencyInfo::new("RUB", "Russian Ruble", "Russia"),
    CurrencyInfo::new("RWF", "Rwandan Franc", "Rwanda"),
    CurrencyInfo::new("SAR", "Saudi Riyal", "Saudi Arabia"),
    CurrencyInfo::new("SBD", "Solomon Islands Dollar", "Solomon Islands"),
    CurrencyInfo::new("SCR", "Seychellois Rupee", "Seychelles"),
    CurrencyInfo::new("SDG", "Sudanese Pound", "Sudan"),
    CurrencyInfo::new("SEK", "Swedish Krona", "Sweden"),
    CurrencyInfo::new("SGD", "Singapore Dollar", "Singapore"),
    CurrencyInfo::new("SHP", "Saint Helena Pound", "Saint Helena"),
    CurrencyInfo::new("SLE", "Sierra Leonean Leone", "Sierra Leone"),
    CurrencyInfo::new("SOS", "Somali Shilling", "Somalia"),
    CurrencyInfo::new("SRD", "Surinamese Dollar", "Suriname"),
    CurrencyInfo::new("SSP", "South Sudanese Pound", "South Sudan"),
    CurrencyInfo::new("STN", "São Tomé and Príncipe Dobra", "São Tomé and Príncipe"),
    CurrencyInfo::new("SYP", "Syrian Pound", "Syria"),
    CurrencyInfo::new("SZL", "Eswatini Lilangeni", "Eswatini"),
    CurrencyInfo::new("THB", "Thai Baht", "Thailand"),
    CurrencyInfo::new("TJS", "Tajikistani Somoni", "Tajikistan"),
    CurrencyInfo::new("TMT", "Turkmenistani Manat", "Turkmenistan"),
    CurrencyInfo::new("TND", "Tunisian Dinar", "Tunisia"),
    CurrencyInfo::new("TOP", "Tongan Paʻanga", "Tonga"),
    CurrencyInfo::new("TRY", "Turkish Lira", "Turkey"),
    CurrencyInfo::new("TTD", "Trinidad and Tobago Dollar", "Trinidad and Tobago"),
    CurrencyInfo::new("TVD", "Tuvaluan Dollar", "Tuvalu"),
    CurrencyInfo::new("TZS", "Tanzanian Shilling", "Tanzania"),
    CurrencyInfo::new("UAH", "Ukrainian Hryvnia", "Ukraine"),
    CurrencyInfo::new("UGX", "Ugandan Shilling", "Uganda"),
    CurrencyInfo::new("USD", "United States Dollar", "United States"),
    CurrencyInfo::new("UYU", "Uruguayan Peso", "Uruguay"),
    CurrencyInfo::new("UZS", "Uzbekistani Som", "Uzbekistan"),
    CurrencyInfo::new("VES", "Venezuelan Bolívar", "Venezuela"),
    CurrencyInfo::new("VND", "Vietnamese Đồng", "Vietnam"),
    CurrencyInfo::new("VUV", "Vanuatu Vatu", "Vanuatu"),
    CurrencyInfo::new("WST", "Samoan Tālā", "Samoa"),
    CurrencyInfo::new("XAF", "Central African CFA Franc", "Central African States"),
    CurrencyInfo::new("XCD", "East Caribbean Dollar", "East Caribbean"),
    CurrencyInfo::new("XDR", "Special Drawing Rights", "International Monetary Fund"),
    CurrencyInfo::new("XOF", "West African CFA Franc", "West African States"),
    CurrencyInfo::new("XPF", "CFP Franc", "French territories of the Pacific"),
    CurrencyInfo::new("YER", "Yemeni Rial", "Yemen"),
    CurrencyInfo::new("ZAR", "South African Rand", "South Africa"),
    CurrencyInfo::new("ZMW", "Zambian Kwacha", "Zambia"),
    CurrencyInfo::new("ZWL", "Zimbabwean Dollar", "Zimbabwe"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_table_is_sorted_and_unique() {
        for pair in CURRENCIES.windows(2) {
            assert!(
                pair[0].code < pair[1].code,
                "{} must sort before {}",
                pair[0].code,
                pair[1].code
            );
        }
        assert!(CURRENCIES.len() > 150);
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let code: CurrencyCode = " usd ".parse().unwrap();
        assert_eq!(code.as_str(), "USD");
        assert_eq!(code.to_string(), "USD");
    }

    #[test]
    fn test_parse_rejects_malformed_codes() {
        for input in ["", "US", "USDT", "U5D", "€UR"] {
            assert!(input.parse::<CurrencyCode>().is_err(), "{input}");
        }
    }

    #[test]
    fn test_known_code_details() {
        let code: CurrencyCode = "KZT".parse().unwrap();
        let info = code.details().expect("KZT should be known");
        assert_eq!(info.name, "Kazakhstani Tenge");
        assert_eq!(info.country, "Kazakhstan");
        assert!(code.is_known());
    }

    #[test]
    fn test_unknown_code_has_no_details() {
        let code: CurrencyCode = "ABC".parse().unwrap();
        assert!(code.details().is_none());
        assert!(!code.is_known());
        assert!(lookup("usd").is_none());
    }

    #[test]
    fn test_first_and_last_entries_are_reachable() {
        assert_eq!(lookup("AED").map(|c| c.country), Some("United Arab Emirates"));
        assert_eq!(lookup("ZWL").map(|c| c.country), Some("Zimbabwe"));
    }
}
