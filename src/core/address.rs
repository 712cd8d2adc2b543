//! 供應商地址擷取（澳洲地址格式）

const START_WORDS: [&str; 3] = ["level", "suite", "elizabeth"];
const STREET_WORDS: [&str; 6] = ["st", "street", "road", "rd", "ave", "avenue"];
const CITY_WORDS: [&str; 6] = ["melbourne", "sydney", "brisbane", "perth", "adelaide", "hobart"];
const STOP_WORDS: [&str; 6] = [
    "customer",
    "payment",
    "invoice",
    "amount",
    "description",
    "quantity",
];
const COUNTRY: &str = "australia";

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// 從第一個像地址開頭的行（level / suite / elizabeth）開始收集，
/// 遇到停止詞或收進含 `australia` 的行後結束。比對是子字串比對。
pub fn extract_supplier_address(lines: &[String]) -> String {
    let mut address: Vec<&str> = Vec::new();
    let mut capturing = false;

    for line in lines {
        let low = line.to_lowercase();

        if !capturing {
            if contains_any(&low, &START_WORDS) {
                capturing = true;
            } else {
                continue;
            }
        }

        if contains_any(&low, &STOP_WORDS) {
            break;
        }

        let is_country = low.contains(COUNTRY);
        if contains_any(&low, &START_WORDS)
            || contains_any(&low, &STREET_WORDS)
            || contains_any(&low, &CITY_WORDS)
            || is_country
        {
            address.push(line);
        }

        if is_country {
            break;
        }
    }

    address.join(", ").replace("  ", " ").trim().to_string()
}
