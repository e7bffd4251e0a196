use crate::error::DataError;
use crate::PerformanceSource;
use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::SectorConfig;
use core_types::{FundPerformanceSnapshot, make_fund_id};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand::distributions::Distribution;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::collections::HashMap;
use statrs::distribution::Normal;
use std::sync::Mutex;
use xxhash_rust::xxh3::xxh3_64;

const GENERIC_FUND_COUNT: usize = 18;
/// Week-on-week drift is this fraction of the fresh-draw volatility.
const DRIFT_SCALE: f64 = 0.25;

/// Mean and standard deviation of a freshly drawn return, in percent.
#[derive(Debug, Clone, Copy)]
struct ReturnModel {
    mean: f64,
    sigma: f64,
}

const MODEL_6M: ReturnModel = ReturnModel { mean: 7.0, sigma: 11.0 };
const MODEL_3M: ReturnModel = ReturnModel { mean: 3.2, sigma: 6.0 };
const MODEL_1M: ReturnModel = ReturnModel { mean: 0.9, sigma: 3.5 };
const MODEL_1Y: ReturnModel = ReturnModel { mean: 12.0, sigma: 14.0 };

const SECTOR_FUNDS: &[(&str, &[&str])] = &[
    ("IA UK All Companies", &[
        "Liontrust Special Situations", "Fidelity Special Situations", "Artemis UK Select",
        "Schroder Recovery", "Jupiter UK Special Situations", "Man GLG UK Income",
        "Invesco UK Equity High Income", "JOHCM UK Equity Income", "Trojan Income",
        "Evenlode Income", "TB Evenlode Income", "Royal London UK Equity Income",
        "Threadneedle UK", "Schroders UK Opportunities", "Rathbone UK Opportunities",
        "Ninety One UK Alpha", "Aviva Investors UK Listed Equity", "abrdn UK Opportunities",
        "BNY Mellon UK Income", "Dimensional UK Core Equity", "L&G UK Index",
        "Vanguard FTSE UK All Share", "iShares UK Equity Index", "HSBC FTSE All Share Index",
        "Fidelity Index UK",
    ]),
    ("IA UK Equity Income", &[
        "City of London Equity", "Murray Income", "Edinburgh Investment", "Law Debenture",
        "Trojan Income", "Evenlode Income", "Royal London UK Equity Income", "Man GLG UK Income",
        "Schroder Income", "Invesco UK Equity High Income", "JOHCM UK Equity Income",
        "Finsbury Growth & Income", "Perpetual Income & Growth", "Henderson UK Equity Income",
        "Artemis Income", "M&G Dividend", "Standard Life UK Equity Income Unconstrained",
        "Dimensional UK Targeted Value", "Vanguard FTSE UK Equity Income Index",
        "iShares UK Dividend",
    ]),
    ("IA Global", &[
        "Fundsmith Equity", "Baillie Gifford Global Discovery", "Scottish Mortgage (OEIC)",
        "Rathbone Global Opportunities", "Morgan Stanley Global Brands", "Artemis Global Income",
        "Ninety One Global Special Situations", "Liontrust Global Growth", "Fidelity Global Focus",
        "Stewart Investors Global Emerging Markets Leaders", "Brown Advisory Global Leaders",
        "Polar Capital Global Technology", "Allianz Global Equity", "Vanguard Global Stock Index",
        "HSBC Global Strategy Dynamic", "Dimensional Global Core Equity", "L&G Global 100 Index",
        "iShares Global Equity Index", "Fidelity World Index", "BlackRock Global Equity",
        "Invesco Global Focus", "Jupiter Global Value Equity", "T. Rowe Price Global Growth",
        "Comgest Growth World", "Guardcap Global Equity", "Veritas Global Real Return",
        "Blue Whale Growth", "GQG Partners Global Equity", "Nomura Global High Conviction",
        "WS Montanaro Global Select", "Trojan Global Income", "Schroder QEP Global Active Value",
    ]),
    ("IA Global Equity Income", &[
        "Artemis Global Income", "Murray International", "JPMorgan Global Equity Income",
        "Fidelity Global Dividend", "Guinness Global Equity Income", "M&G Global Dividend",
        "Newton Global Income", "Investec Global Quality Equity Income", "Evenlode Global Income",
        "Royal London Global Equity Income", "Schroder Global Equity Income",
        "Dimensional Global Targeted Value", "Vanguard FTSE All-World High Dividend Yield",
        "WisdomTree Global Quality Dividend Growth", "WS Canaccord Genuity Global Eq Income",
    ]),
    ("IA Global Emerging Markets", &[
        "Stewart Investors Global Emerging Markets Leaders", "Fidelity Emerging Markets",
        "GQG Partners Emerging Markets Equity", "Ninety One Global Special Situations",
        "Genesis Emerging Markets", "Aubrey Global Emerging Markets Opportunities",
        "Mobius Emerging Markets", "Schroder Global Emerging Markets", "JPMorgan Emerging Markets",
        "HSBC Global Emerging Markets", "Vanguard Emerging Markets Stock Index",
        "abrdn Emerging Markets", "BlackRock Emerging Markets",
        "Dimensional Emerging Markets Core Equity", "Comgest Growth Emerging Markets",
        "Coronation Global Emerging Markets", "Somerset Emerging Markets Dividend Growth",
        "GS Emerging Markets CORE Equity", "RWC Global Emerging Markets",
        "Fundsmith Emerging Equities Trust (OEIC)",
    ]),
    ("IA UK Smaller Companies", &[
        "Liontrust UK Micro Cap", "Marlborough Multi Cap Income", "Slater Growth",
        "Octopus UK Micro Cap Growth", "Miton UK Multi Cap Income", "abrdn UK Smaller Companies",
        "Gresham House UK Multi Cap Income", "Unicorn UK Income",
        "Threadneedle UK Smaller Companies", "FTF Martin Currie UK Smaller Cos",
        "Vanguard FTSE UK All Share Index", "Henderson Smaller Companies (OEIC)",
        "Dimension UK Small Companies", "River and Mercantile UK Dynamic Equity",
        "Schroder UK Smaller Companies", "TB Amati UK Smaller Companies",
        "Canaccord Genuity UK Smaller Companies", "Gresham House UK Smaller Cos",
        "WS Canaccord Genuity UK Smaler Cos", "Chelverton UK Equity Income",
        "Chelverton UK Equity Growth",
    ]),
    ("IA North America", &[
        "Baillie Gifford American", "Vanguard US Equity Index", "HSBC American Index",
        "Fidelity Index US", "L&G US Index", "iShares US Equity Index", "Royal London US Growth",
        "Brown Advisory US Equity Growth", "Natixis Loomis Sayles US Equity Leaders",
        "T. Rowe Price US Large Cap Growth Equity", "Alger American Asset Growth",
        "Legg Mason ClearBridge US Aggressive Growth", "JPMorgan US Select", "Artemis US Select",
        "Threadneedle American", "Schroder US Mid Cap", "Dimensional US Core Equity",
        "Neuberger Berman US Multi Cap Opportunities", "Polen Capital Focus US Growth",
        "Guinness US Equity Income", "Brown Advisory US Sustainable Growth",
        "Gabelli US Fundamental Value", "Findlay Park American", "Hermes US SMID Equity",
    ]),
    ("IA Flexible Investment", &[
        "Personal Assets Trust (OEIC)", "Capital Gearing (OEIC)", "Trojan",
        "Ruffer Total Return", "VT Tatton Global Adventurous", "Premier Miton Diversified Growth",
        "Jupiter Merlin Growth Portfolio", "Schroder Multi-Asset Total Return",
        "Invesco Distribution", "Man GLG Dynamic Income", "Waverton Multi-Asset Income",
        "BNY Mellon Multi-Asset Balanced", "Artemis Monthly Distribution",
        "VT AJ Bell Adventurous", "WS Canaccord Genuity Balanced",
        "Vanguard LifeStrategy 80% Equity", "HSBC Global Strategy Balanced",
        "Dimensional Global Allocation",
    ]),
    ("IA Mixed Investment 40-85% Shares", &[
        "Vanguard LifeStrategy 60% Equity", "HSBC Global Strategy Balanced",
        "Fidelity Multi Asset Allocator Balanced", "L&G Multi-Index 5", "Dimensional 60-40 Global",
        "Royal London Sustainable Diversified", "Schroder MM Diversity",
        "BNY Mellon Multi-Asset Growth", "Jupiter Merlin Balanced Portfolio",
        "Invesco Global Targeted Returns", "Rathbone Strategic Growth Portfolio",
        "Premier Miton Diversified Balance", "WS Canaccord Genuity Balanced",
        "Baillie Gifford Managed", "Aviva Investors Multi-Asset Core 5",
        "AXA Framlington Managed Balanced", "MI Downing Fox Balanced", "Margetts Aries Strategy",
        "Hargreaves Lansdown Multi-Manager Balanced Managed",
    ]),
    ("IA Sterling Strategic Bond", &[
        "Artemis Strategic Bond", "M&G Strategic Corporate Bond", "Royal London Strategic Bond",
        "TwentyFour Dynamic Bond", "Rathbone Ethical Bond", "Jupiter Strategic Bond",
        "Invesco Tactical Bond", "Baillie Gifford Strategic Bond", "Schroder Strategic Credit",
        "Henderson Strategic Bond", "Liontrust Monthly Income Bond",
        "Vanguard UK Government Bond Index", "iShares Corporate Bond Index",
        "HSBC Sterling Bond", "Fidelity Strategic Bond", "Aviva Investors Strategic Bond",
        "Axa Framlington Strategic Bond", "GAM Star Credit Opportunities", "Kames Strategic Bond",
    ]),
    ("IA Infrastructure", &[
        "First Sentier Global Listed Infrastructure", "Legg Mason IF Rare Infrastructure Income",
        "ATLAS Infrastructure", "RARE Infrastructure Income", "Vanguard FTSE All-World",
        "iShares Global Infrastructure", "L&G Global Infrastructure Index",
        "BlackRock Natural Resources Growth & Income", "Schroder Global Energy Transition",
        "Lazard Global Listed Infrastructure Equity", "Cohen & Steers Global Listed Infrastructure",
    ]),
];

/// A deterministic stand-in for the live data feed.
///
/// The same sector and week always produce the same funds. Once a sector has been
/// generated, the next call for it drifts from those values instead of drawing
/// fresh ones, so rankings evolve plausibly over consecutive weeks.
#[derive(Debug, Default)]
pub struct MockSource {
    previous: Mutex<HashMap<String, Vec<FundPerformanceSnapshot>>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PerformanceSource for MockSource {
    async fn fetch_sector(
        &self,
        sector: &SectorConfig,
        week_date: NaiveDate,
    ) -> Result<Vec<FundPerformanceSnapshot>, DataError> {
        let mut previous = self.previous.lock().map_err(|_| DataError::StatePoisoned)?;
        let funds = generate_sector(
            &sector.code,
            week_date,
            previous.get(&sector.code).map(Vec::as_slice),
        );
        previous.insert(sector.code.clone(), funds.clone());
        Ok(funds)
    }
}

/// Generates one sector's snapshot for a week, drifting from `previous` when given.
pub fn generate_sector(
    sector_code: &str,
    week_date: NaiveDate,
    previous: Option<&[FundPerformanceSnapshot]>,
) -> Vec<FundPerformanceSnapshot> {
    let mut rng = StdRng::seed_from_u64(week_seed(sector_code, week_date));
    let previous: HashMap<&str, &FundPerformanceSnapshot> = previous
        .unwrap_or_default()
        .iter()
        .map(|f| (f.fund_name.as_str(), f))
        .collect();

    fund_names(sector_code)
        .into_iter()
        .map(|name| {
            let prior = previous.get(name.as_str()).copied();
            let name_hash = xxh3_64(name.as_bytes());
            let isin = format!("GB{:010}", name_hash % 10_000_000_000);

            let return_6m = draw(&mut rng, prior.and_then(|p| p.return_6m), MODEL_6M);
            let return_3m = draw(&mut rng, prior.and_then(|p| p.return_3m), MODEL_3M);
            let return_1m = draw(&mut rng, prior.and_then(|p| p.return_1m), MODEL_1M);
            let return_1y = draw(&mut rng, prior.and_then(|p| p.return_1y), MODEL_1Y);

            // Some funds are too young to have longer-horizon returns.
            let young = name_hash % 23 == 0;
            let very_young = name_hash % 46 == 0;

            FundPerformanceSnapshot {
                fund_id: make_fund_id(&name, Some(&isin)),
                sector_code: sector_code.to_string(),
                return_1m,
                return_3m: (!very_young).then_some(return_3m).flatten(),
                return_6m: (!young).then_some(return_6m).flatten(),
                return_1y: (!young).then_some(return_1y).flatten(),
                fund_name: name,
            }
        })
        .collect()
}

fn fund_names(sector_code: &str) -> Vec<String> {
    match SECTOR_FUNDS.iter().find(|(code, _)| *code == sector_code) {
        Some((_, names)) => names.iter().map(|n| n.to_string()).collect(),
        None => {
            let stem = sector_code.strip_prefix("IA ").unwrap_or(sector_code);
            (1..=GENERIC_FUND_COUNT)
                .map(|i| format!("{stem} Fund {i}"))
                .collect()
        }
    }
}

fn draw(rng: &mut StdRng, prior: Option<Decimal>, model: ReturnModel) -> Option<Decimal> {
    let value = match prior {
        Some(old) => old + Decimal::from_f64(sample(rng, 0.0, model.sigma * DRIFT_SCALE)?)?,
        None => Decimal::from_f64(sample(rng, model.mean, model.sigma)?)?,
    };
    Some(value.round_dp(2))
}

fn sample(rng: &mut StdRng, mean: f64, sigma: f64) -> Option<f64> {
    Normal::new(mean, sigma).ok().map(|normal| normal.sample(rng))
}

/// Seed for one sector/week. xxh3 is a fixed algorithm, so generated funds (and
/// their ids) do not change between toolchains.
fn week_seed(sector_code: &str, week_date: NaiveDate) -> u64 {
    xxh3_64(format!("{sector_code}|{week_date}").as_bytes())
}
