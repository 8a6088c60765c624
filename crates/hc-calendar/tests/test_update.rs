//! Pooling of a year's announcements and the files written from it.

use hc_calendar::{
    fetch_holidays, update_data, update_main_ics, PaperSource, StaticPapers, YearData,
};
use hc_core::ExportSettings;
use hc_time::{Calendar, China, Date};

const YEARLY_URL: &str = "http://www.gov.cn/zhengce/content/2018-12/06/content_5346276.htm";
const PATCH_URL: &str = "http://www.gov.cn/zhengce/content/2019-03/22/content_5375877.htm";

const YEARLY_2019: &str = "\
国务院办公厅关于2019年部分节假日安排的通知
经国务院批准，现将2019年元旦、春节、清明节、劳动节、端午节、中秋节和国庆节放假调休日期的具体安排通知如下。
一、元旦：2018年12月30日至2019年1月1日放假调休，共3天。2018年12月29日（星期六）上班。
二、春节：2月4日至10日放假调休，共7天。2月2日（星期六）、2月3日（星期日）上班。
三、清明节：4月5日放假，与周末连休。
四、劳动节：5月1日放假。
五、端午节：6月7日放假，与周末连休。
六、中秋节：9月13日放假，与周末连休。
七、国庆节：10月1日至7日放假调休，共7天。9月29日（星期日）、10月12日（星期六）上班。
国务院办公厅
2018年12月6日";

const PATCH_2019: &str = "\
国务院办公厅关于调整2019年劳动节假期安排的通知
经国务院批准，现将2019年劳动节假期调整安排通知如下：
2019年5月1日至4日放假调休，共4天。4月28日（星期日）、5月5日（星期日）上班。
国务院办公厅
2019年3月22日";

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn source() -> StaticPapers {
    StaticPapers::new()
        .with_paper(2019, YEARLY_URL, YEARLY_2019)
        .with_paper(2019, PATCH_URL, PATCH_2019)
}

#[test]
fn adjustment_notice_extends_labour_day() {
    let data = fetch_holidays(2019, &source()).unwrap();
    assert_eq!(data.papers, [YEARLY_URL, PATCH_URL]);
    let off = data.days.iter().filter(|d| d.is_off_day).count();
    assert_eq!(off, 24);
    assert_eq!(data.days.len() - off, 7);
    assert!(data.days.windows(2).all(|w| w[0].date < w[1].date));

    let cal = China::from_records(data.days);
    assert!(cal.is_holiday(date(2019, 5, 3)));
    assert!(cal.is_business_day(date(2019, 4, 28)));
    assert!(cal.is_business_day(date(2019, 5, 5)));
    assert_eq!(cal.holiday_name(date(2019, 5, 2)), Some("劳动节"));
}

#[test]
fn yearly_files_are_written() {
    let dir = tempfile::tempdir().unwrap();
    let settings = ExportSettings::default().with_data_dir(dir.path().join("data"));
    let written = update_data(2019, &source(), &settings).unwrap();
    assert_eq!(written, [settings.year_json_path(2019), settings.year_ics_path(2019)]);

    let data = YearData::read(&written[0]).unwrap();
    assert_eq!(data, fetch_holidays(2019, &source()).unwrap());

    let ics = std::fs::read_to_string(&written[1]).unwrap();
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 13);
    assert!(ics.contains("DTSTART;VALUE=DATE:20190501\r\nDTEND;VALUE=DATE:20190505\r\n"));
    assert!(ics.contains("SUMMARY:上班(补劳动节假期)\r\n"));
    assert!(!ics.replace("\r\n", "").contains('\n'));
}

#[test]
fn merged_calendar_skips_missing_years() {
    let dir = tempfile::tempdir().unwrap();
    let settings = ExportSettings::default().with_data_dir(dir.path());
    update_data(2019, &source(), &settings).unwrap();

    let merged = update_main_ics(2015, 2020, &settings).unwrap();
    assert_eq!(merged, dir.path().join("holiday-cn.ics"));
    let merged_text = std::fs::read_to_string(&merged).unwrap();
    let yearly_text = std::fs::read_to_string(settings.year_ics_path(2019)).unwrap();
    assert_eq!(merged_text, yearly_text);
}

#[test]
fn unknown_paper_url_fails() {
    let dir = tempfile::tempdir().unwrap();
    let settings = ExportSettings::default().with_data_dir(dir.path());
    // Lists a URL it has no text for.
    struct Missing(StaticPapers);
    impl PaperSource for Missing {
        fn paper_urls(&self, _year: u16) -> hc_core::Result<Vec<String>> {
            Ok(vec!["http://example.invalid/".into()])
        }
        fn paper(&self, url: &str) -> hc_core::Result<String> {
            self.0.paper(url)
        }
    }
    assert!(update_data(2020, &Missing(source()), &settings).is_err());
    assert!(!settings.year_json_path(2020).exists());
}
