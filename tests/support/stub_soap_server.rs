use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Mutex;

use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};

pub const NAMESPACE: &str = "https://turkpos.com.tr/";

pub const OPERATIONS: [&str; 7] = [
	"Pos_Odeme",
	"TP_Islem_Iptal_Iade_Kismi2",
	"KK_Saklama",
	"KS_Tahsilat",
	"KK_Sakli_Liste",
	"KS_Kart_Sil",
	"TP_Mutabakat_Ozet",
];

#[derive(Debug, Clone)]
pub struct RecordedRequest {
	pub operation: String,
	pub body:      String,
}

struct StubState {
	endpoint:  String,
	requests:  Mutex<Vec<RecordedRequest>>,
	overrides: Mutex<HashMap<String, (u16, String)>>,
}

/// In-process SOAP service that serves its own WSDL and answers every
/// operation with a canned success envelope unless told otherwise.
pub struct StubSoapServer {
	state: web::Data<StubState>,
}

impl StubSoapServer {
	pub async fn start() -> Self {
		let listener = TcpListener::bind("127.0.0.1:0").unwrap();
		let port = listener.local_addr().unwrap().port();
		let state = web::Data::new(StubState {
			endpoint:  format!("http://127.0.0.1:{port}/service.asmx"),
			requests:  Mutex::new(Vec::new()),
			overrides: Mutex::new(HashMap::new()),
		});

		let app_state = state.clone();
		let server = HttpServer::new(move || {
			App::new()
				.app_data(app_state.clone())
				.route("/service.asmx", web::get().to(serve_wsdl))
				.route("/service.asmx", web::post().to(serve_operation))
		})
		.workers(1)
		.listen(listener)
		.unwrap()
		.run();
		actix_web::rt::spawn(server);

		Self { state }
	}

	pub fn endpoint(&self) -> &str {
		&self.state.endpoint
	}

	pub fn wsdl_url(&self) -> String {
		format!("{}?wsdl", self.state.endpoint)
	}

	/// Answers `operation` with `status` and a raw `body` from now on.
	pub fn respond_with(&self, operation: &str, status: u16, body: &str) {
		self.state
			.overrides
			.lock()
			.unwrap()
			.insert(operation.to_string(), (status, body.to_string()));
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.state.requests.lock().unwrap().clone()
	}

	pub fn operations_called(&self) -> Vec<String> {
		self.requests()
			.into_iter()
			.map(|request| request.operation)
			.collect()
	}

	pub fn last_body(&self, operation: &str) -> Option<String> {
		self.requests()
			.into_iter()
			.rev()
			.find(|request| request.operation == operation)
			.map(|request| request.body)
	}
}

async fn serve_wsdl(state: web::Data<StubState>) -> HttpResponse {
	HttpResponse::Ok()
		.content_type("text/xml; charset=utf-8")
		.body(wsdl_document(&state.endpoint))
}

async fn serve_operation(
	req: HttpRequest,
	body: String,
	state: web::Data<StubState>,
) -> HttpResponse {
	let action = req
		.headers()
		.get("SOAPAction")
		.and_then(|value| value.to_str().ok())
		.unwrap_or_default()
		.trim_matches('"')
		.to_string();

	let Some(operation) = action
		.strip_prefix(NAMESPACE)
		.filter(|operation| OPERATIONS.contains(operation))
	else {
		return xml_response(
			500,
			fault_envelope(
				"soap:Client",
				&format!("Server did not recognize the value of HTTP Header SOAPAction: {action}."),
			),
		);
	};

	state.requests.lock().unwrap().push(RecordedRequest {
		operation: operation.to_string(),
		body,
	});

	let overridden = state.overrides.lock().unwrap().get(operation).cloned();
	match overridden {
		Some((status, body)) => xml_response(status, body),
		None => xml_response(
			200,
			result_envelope(operation, &default_result(operation)),
		),
	}
}

fn xml_response(status: u16, body: String) -> HttpResponse {
	HttpResponse::build(StatusCode::from_u16(status).unwrap())
		.content_type("text/xml; charset=utf-8")
		.body(body)
}

pub fn result_envelope(operation: &str, result: &str) -> String {
	format!(
		r#"<?xml version="1.0" encoding="utf-8"?><soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema"><soap:Body><{operation}Response xmlns="{NAMESPACE}"><{operation}Result>{result}</{operation}Result></{operation}Response></soap:Body></soap:Envelope>"#
	)
}

pub fn fault_envelope(code: &str, message: &str) -> String {
	format!(
		r#"<?xml version="1.0" encoding="utf-8"?><soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body><soap:Fault><faultcode>{code}</faultcode><faultstring>{message}</faultstring><detail /></soap:Fault></soap:Body></soap:Envelope>"#
	)
}

pub const STORED_CARD_LIST: &str = r#"<Sonuc>1</Sonuc><Sonuc_Str>Basarili</Sonuc_Str><DT_Bilgi><xs:schema id="NewDataSet" xmlns:xs="http://www.w3.org/2001/XMLSchema" xmlns:msdata="urn:schemas-microsoft-com:xml-msdata"><xs:element name="NewDataSet" msdata:IsDataSet="true"><xs:complexType><xs:choice minOccurs="0" maxOccurs="unbounded"><xs:element name="Temp"><xs:complexType><xs:sequence><xs:element name="ID" type="xs:int" minOccurs="0" /><xs:element name="KK_GUID" type="xs:string" minOccurs="0" /><xs:element name="Tarih" type="xs:dateTime" minOccurs="0" /></xs:sequence></xs:complexType></xs:element></xs:choice></xs:complexType></xs:element></xs:schema><diffgr:diffgram xmlns:msdata="urn:schemas-microsoft-com:xml-msdata" xmlns:diffgr="urn:schemas-microsoft-com:xml-diffgram-v1"><NewDataSet xmlns=""><Temp diffgr:id="Temp1" msdata:rowOrder="0"><ID>41</ID><KK_GUID>stub-ks-guid</KK_GUID><Tarih>2026-10-17T11:59:00+03:00</Tarih><KK_No>454671******7894</KK_No><Kart_Adi>Is Kartim</Kart_Adi><KK_Banka>Test Bank</KK_Banka><KK_Marka>VISA</KK_Marka><KK_Tip>Credit</KK_Tip><KK_Son4>7894</KK_Son4></Temp><Temp diffgr:id="Temp2" msdata:rowOrder="1"><ID>42</ID><KK_GUID>older-ks-guid</KK_GUID><Tarih>2026-10-01T08:00:00.27+03:00</Tarih><KK_No>454671******7894</KK_No><Kart_Adi /><KK_Banka>Test Bank</KK_Banka><KK_Marka>VISA</KK_Marka><KK_Tip>Credit</KK_Tip><KK_Son4>7894</KK_Son4></Temp></NewDataSet></diffgr:diffgram></DT_Bilgi>"#;

fn default_result(operation: &str) -> String {
	match operation {
		"Pos_Odeme" => "<Islem_ID>6000001</Islem_ID><UCD_URL>NONSECURE</UCD_URL><Sonuc>1</Sonuc><Sonuc_Str>Islem Basarili</Sonuc_Str><Banka_Sonuc_Kod>0</Banka_Sonuc_Kod>".to_string(),
		"KK_Saklama" => "<Sonuc>1</Sonuc><Sonuc_Str>Basarili</Sonuc_Str><GUID>stub-ks-guid</GUID>".to_string(),
		"KS_Tahsilat" => "<Islem_ID>6000002</Islem_ID><UCD_URL>NONSECURE</UCD_URL><Sonuc>1</Sonuc><Sonuc_Str>Islem Basarili</Sonuc_Str><Banka_Sonuc_Kod>0</Banka_Sonuc_Kod>".to_string(),
		"KK_Sakli_Liste" => STORED_CARD_LIST.to_string(),
		"TP_Mutabakat_Ozet" => "<Sonuc>1</Sonuc><Sonuc_Str>Basarili</Sonuc_Str><DT_Bilgi><Toplam_Islem_Adet>2</Toplam_Islem_Adet><Toplam_Tutar>110,00</Toplam_Tutar></DT_Bilgi>".to_string(),
		_ => "<Sonuc>1</Sonuc><Sonuc_Str>Basarili</Sonuc_Str>".to_string(),
	}
}

fn wsdl_document(endpoint: &str) -> String {
	let operations: String = OPERATIONS
		.iter()
		.map(|operation| {
			format!(
				r#"<wsdl:operation name="{operation}"><wsdl:input message="tns:{operation}SoapIn" /><wsdl:output message="tns:{operation}SoapOut" /></wsdl:operation>"#
			)
		})
		.collect();

	format!(
		r#"<?xml version="1.0" encoding="utf-8"?>
<wsdl:definitions xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/" xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/" xmlns:tns="{NAMESPACE}" targetNamespace="{NAMESPACE}">
<wsdl:portType name="TurkPosWebServiceSoap">{operations}</wsdl:portType>
<wsdl:service name="TurkPosWebService">
<wsdl:port name="TurkPosWebServiceSoap" binding="tns:TurkPosWebServiceSoap"><soap:address location="{endpoint}" /></wsdl:port>
</wsdl:service>
</wsdl:definitions>"#
	)
}
